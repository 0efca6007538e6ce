//! 画像プレビューコンポーネント

use leptos::prelude::*;
use tumor_ai_common::DrawingSurface;

use crate::view::Preview;

#[component]
pub fn ImagePreview(
    preview: RwSignal<Option<Preview>>,
    surface: RwSignal<DrawingSurface>,
) -> impl IntoView {
    let src = move || preview.with(|p| p.as_ref().map(|p| p.url.clone()).unwrap_or_default());

    view! {
        <div class="image-preview">
            <Show
                when=move || preview.with(Option::is_some)
                fallback=|| view! {
                    <div id="imagePlaceholder" class="image-placeholder">
                        <i class="fas fa-image"></i>
                        <p>"No image uploaded"</p>
                    </div>
                }
            >
                <img id="uploadedImage" class="uploaded-image" src=src alt="Uploaded image" />
            </Show>
            // 描画用（現状は常に非表示）
            <canvas
                id="segmentationCanvas"
                class:hidden=move || !surface.get().visible
                width=move || surface.get().width.to_string()
                height=move || surface.get().height.to_string()
            ></canvas>
        </div>
    }
}
