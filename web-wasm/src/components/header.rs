//! ヘッダーコンポーネント（API接続状態つき）

use leptos::prelude::*;
use tumor_ai_common::ConnectivityStatus;

/// ステータスドットのクラス
pub fn status_class(status: Option<&ConnectivityStatus>) -> &'static str {
    match status {
        Some(s) if s.connected => "status-dot connected",
        _ => "status-dot",
    }
}

pub fn status_text(status: Option<&ConnectivityStatus>) -> String {
    status
        .map(|s| s.message.clone())
        .unwrap_or_else(|| "Checking API...".to_string())
}

#[component]
pub fn Header(status: RwSignal<Option<ConnectivityStatus>>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Brain Tumor Detection"</h1>
            <div class="api-status">
                <span id="apiStatus" class=move || status.with(|s| status_class(s.as_ref()))></span>
                <span id="apiStatusText">{move || status.with(|s| status_text(s.as_ref()))}</span>
            </div>
        </header>
    }
}
