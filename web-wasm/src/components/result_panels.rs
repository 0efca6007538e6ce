//! 結果パネルコンポーネント
//!
//! 各パネルはプレースホルダか結果表示のどちらか一方だけを表示する。

use leptos::prelude::*;
use tumor_ai_common::ClassificationDisplay;

use crate::components::confidence_bar::ConfidenceBar;

#[component]
pub fn ClassificationPanel(result: RwSignal<Option<ClassificationDisplay>>) -> impl IntoView {
    let label = move || result.with(|r| r.as_ref().map(|r| r.label.clone()).unwrap_or_default());
    let percent =
        move || result.with(|r| r.as_ref().map(|r| r.percent_text.clone()).unwrap_or_default());

    view! {
        <div id="predictionResult" class="result-card">
            <h3>"VGG Classification"</h3>
            <Show
                when=move || result.with(Option::is_some)
                fallback=|| view! {
                    <p class="result-placeholder">"Run a prediction to see the result"</p>
                }
            >
                <div class="result-details">
                    <p>"Prediction: " <span id="predictionLabel">{label}</span></p>
                    <p>"Confidence: " <span id="predictionConfidence">{percent}</span></p>
                    <ConfidenceBar result=result />
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn AnnotatedPanel(
    panel_id: &'static str,
    container_id: &'static str,
    title: &'static str,
    placeholder: &'static str,
    image_url: RwSignal<Option<String>>,
) -> impl IntoView {
    let src = move || image_url.get().unwrap_or_default();

    view! {
        <div id=panel_id class="result-card">
            <h3>{title}</h3>
            <Show
                when=move || image_url.with(Option::is_some)
                fallback=move || view! { <p class="result-placeholder">{placeholder}</p> }
            >
                <div class="result-details">
                    <div id=container_id class="image-container">
                        <img class="annotated-image" src=src alt="Annotated Image" />
                    </div>
                </div>
            </Show>
        </div>
    }
}
