//! アップロードエリアコンポーネント
//!
//! クリックでファイル選択、またはドラッグ&ドロップ。1枚目のファイルだけを扱う。

use gloo::file::futures::read_as_bytes;
use gloo::file::{File as GlooFile, FileReadError};
use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, File};

#[component]
pub fn UploadArea<F>(
    file_input: NodeRef<Input>,
    file_name: Signal<String>,
    on_file: F,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // ファイル選択ダイアログを開く
    let on_click = move |_| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let on_change = move |_| {
        let file = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        // 選択なしは何もしない
        if let Some(file) = file {
            on_file(file);
        }
    };

    view! {
        <input
            type="file"
            id="imageInput"
            class="hidden"
            accept="image/png,image/jpeg,image/jpg,image/bmp,image/tiff"
            node_ref=file_input
            on:change=on_change
        />
        <div
            id="uploadArea"
            class=move || {
                if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <div class="upload-icon"><i class="fas fa-cloud-upload-alt"></i></div>
            <p>"Drag & drop an image or click to browse"</p>
            <p class="text-muted">"Supported: PNG, JPG, JPEG, BMP, TIFF"</p>
        </div>
        <p id="selectedFile" class="selected-file">{move || file_name.get()}</p>
    }
}

/// ファイル名・MIMEタイプ・中身を読み込む
pub async fn read_bytes(file: &GlooFile) -> Result<(String, String, Vec<u8>), FileReadError> {
    let bytes = read_as_bytes(file).await?;
    Ok((file.name(), file.raw_mime_type(), bytes))
}

/// ファイルを読み込み、バイト列を渡す
pub fn read_file<F>(file: File, on_loaded: F)
where
    F: FnOnce(String, String, Vec<u8>) + 'static,
{
    let file = GlooFile::from(file);
    spawn_local(async move {
        match read_bytes(&file).await {
            Ok((name, mime, bytes)) => on_loaded(name, mime, bytes),
            Err(e) => log::error!("failed to read {}: {}", file.name(), e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_read_bytes_keeps_name_and_type() {
        let file = GlooFile::new_with_options("scan.png", &[0x89u8, 0x50, 0x4e, 0x47][..], Some("image/png"), None);
        let (name, mime, bytes) = read_bytes(&file).await.unwrap();

        assert_eq!(name, "scan.png");
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    }
}
