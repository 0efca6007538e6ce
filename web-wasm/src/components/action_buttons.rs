//! アクションボタンコンポーネント

use leptos::prelude::*;
use tumor_ai_common::{ActionState, Variant, BUSY_LABEL};

pub fn button_label(variant: Variant, state: ActionState) -> &'static str {
    match state {
        ActionState::Busy => BUSY_LABEL,
        ActionState::Ready | ActionState::Disabled => variant.label(),
    }
}

pub fn button_icon(variant: Variant, state: ActionState) -> &'static str {
    match state {
        ActionState::Busy => "fas fa-spinner fa-spin",
        ActionState::Ready | ActionState::Disabled => variant.icon(),
    }
}

fn button_id(variant: Variant) -> &'static str {
    match variant {
        Variant::Classify => "predictVggBtn",
        Variant::Detect => "detectYoloBtn",
        Variant::Segment => "segmentSamBtn",
    }
}

#[component]
pub fn ActionButtons<FA, FR>(
    actions: [RwSignal<ActionState>; 3],
    on_action: FA,
    on_reset: FR,
) -> impl IntoView
where
    FA: Fn(Variant) + 'static + Clone,
    FR: Fn(()) + 'static + Clone,
{
    let buttons = Variant::ALL
        .into_iter()
        .map(|variant| {
            let state = actions[variant.index()];
            let on_action = on_action.clone();
            view! {
                <button
                    id=button_id(variant)
                    class="btn btn-primary"
                    disabled=move || !state.get().is_enabled()
                    on:click=move |_| on_action(variant)
                >
                    <i class=move || button_icon(variant, state.get())></i>
                    " "
                    {move || button_label(variant, state.get())}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="action-buttons">
            {buttons}
            <button
                id="resetBtn"
                class="btn btn-secondary"
                on:click={
                    let on_reset = on_reset.clone();
                    move |_| on_reset(())
                }
            >
                <i class="fas fa-redo"></i>
                " Reset"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_label_restored_after_busy() {
        for variant in Variant::ALL {
            assert_eq!(button_label(variant, ActionState::Busy), "Processing...");
            assert_eq!(button_label(variant, ActionState::Ready), variant.label());
            assert_eq!(button_label(variant, ActionState::Disabled), variant.label());
        }
    }

    #[test]
    fn test_button_icon() {
        assert_eq!(button_icon(Variant::Detect, ActionState::Busy), "fas fa-spinner fa-spin");
        assert_eq!(button_icon(Variant::Detect, ActionState::Ready), "fas fa-crosshairs");
    }
}
