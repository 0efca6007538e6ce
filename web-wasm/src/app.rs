//! メインアプリケーションコンポーネント

use std::rc::Rc;

use leptos::prelude::*;
use tumor_ai_common::{Client, Variant, NO_FILE_LABEL};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::api::FetchBackend;
use crate::components::{
    action_buttons::ActionButtons,
    header::Header,
    preview::ImagePreview,
    result_panels::{AnnotatedPanel, ClassificationPanel},
    upload_area::{read_file, UploadArea},
};
use crate::view::SignalView;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let view = SignalView::new();
    let client = StoredValue::new_local(Rc::new(Client::new(FetchBackend::same_origin(), view)));

    // 起動時に1回だけ疎通確認
    let probe = client.get_value();
    spawn_local(async move {
        probe.check_connectivity().await;
    });

    let file_name = Signal::derive(move || {
        view.preview.with(|p| {
            p.as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| NO_FILE_LABEL.to_string())
        })
    });

    // ファイル選択ハンドラ
    let on_file = move |file: File| {
        read_file(file, move |name, mime, bytes| {
            // 拒否時の警告とログはクライアント側で済んでいる
            if client.get_value().stage_file(&name, &mime, bytes).is_err() {
                log::debug!("upload of {} was not staged", name);
            }
        });
    };

    // 推論アクションハンドラ（アクションごとに独立したタスク）
    let on_action = move |variant: Variant| {
        let client = client.get_value();
        spawn_local(async move {
            if client.run(variant).await.is_err() {
                log::debug!("{} finished with an error", variant.as_str());
            }
        });
    };

    // リセットハンドラ
    let on_reset = move |_| {
        client.with_value(|c| c.reset());
    };

    view! {
        <div class="container">
            <Header status=view.status />

            <section class="upload-section">
                <UploadArea
                    file_input=view.file_input
                    file_name=file_name
                    on_file=on_file
                />
                <ImagePreview preview=view.preview surface=view.surface />
                <ActionButtons
                    actions=view.actions
                    on_action=on_action
                    on_reset=on_reset
                />
            </section>

            <section class="results-section">
                <ClassificationPanel result=view.classification />
                <AnnotatedPanel
                    panel_id="detectionResult"
                    container_id="detectionImageContainer"
                    title="YOLO Detection"
                    placeholder="Run detection to see the annotated image"
                    image_url=view.detection
                />
                <AnnotatedPanel
                    panel_id="segmentationResult"
                    container_id="segmentationImageContainer"
                    title="SAM Segmentation"
                    placeholder="Run segmentation to see the annotated image"
                    image_url=view.segmentation
                />
            </section>
        </div>
    }
}
