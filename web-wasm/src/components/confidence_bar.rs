//! 信頼度バーコンポーネント

use leptos::prelude::*;
use tumor_ai_common::ClassificationDisplay;

/// 結果なしの場合は幅0
pub fn fill_style(result: Option<&ClassificationDisplay>) -> String {
    result
        .map(ClassificationDisplay::fill_style)
        .unwrap_or_else(|| "width: 0%".to_string())
}

#[component]
pub fn ConfidenceBar(result: RwSignal<Option<ClassificationDisplay>>) -> impl IntoView {
    view! {
        <div class="confidence-bar">
            <div
                id="confidenceFill"
                class="confidence-fill"
                style=move || result.with(|r| fill_style(r.as_ref()))
            />
        </div>
    }
}
