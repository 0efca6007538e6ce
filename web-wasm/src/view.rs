//! シグナルによるView実装
//!
//! クライアントからの更新はすべてここでシグナルに書き込み、
//! コンポーネントはシグナルを読むだけにする。

use leptos::html::Input;
use leptos::prelude::*;
use tumor_ai_common::{
    ActionState, AnnotatedImage, ClassificationDisplay, ConnectivityStatus, DrawingSurface, Error,
    Result, StagedImage, Variant, View,
};

use crate::blob::{object_url, revoke};

/// プレビュー画像
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Copy)]
pub struct SignalView {
    pub preview: RwSignal<Option<Preview>>,
    pub surface: RwSignal<DrawingSurface>,
    pub actions: [RwSignal<ActionState>; 3],
    pub classification: RwSignal<Option<ClassificationDisplay>>,
    pub detection: RwSignal<Option<String>>,
    pub segmentation: RwSignal<Option<String>>,
    pub status: RwSignal<Option<ConnectivityStatus>>,
    pub file_input: NodeRef<Input>,
}

impl SignalView {
    pub fn new() -> Self {
        Self {
            preview: RwSignal::new(None),
            surface: RwSignal::new(DrawingSurface::default()),
            actions: [
                RwSignal::new(ActionState::Disabled),
                RwSignal::new(ActionState::Disabled),
                RwSignal::new(ActionState::Disabled),
            ],
            classification: RwSignal::new(None),
            detection: RwSignal::new(None),
            segmentation: RwSignal::new(None),
            status: RwSignal::new(None),
            file_input: NodeRef::new(),
        }
    }

    pub fn action(&self, variant: Variant) -> RwSignal<ActionState> {
        self.actions[variant.index()]
    }

    /// 注釈付き画像のパネル（分類はなし）
    pub fn annotated(&self, variant: Variant) -> Option<RwSignal<Option<String>>> {
        match variant {
            Variant::Classify => None,
            Variant::Detect => Some(self.detection),
            Variant::Segment => Some(self.segmentation),
        }
    }
}

/// URLを差し替え、古いオブジェクトURLを解放する
fn replace_url(slot: RwSignal<Option<String>>, url: Option<String>) {
    let previous = slot.get_untracked();
    slot.set(url);
    if let Some(previous) = previous {
        revoke(&previous);
    }
}

impl View for SignalView {
    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn set_action(&self, variant: Variant, state: ActionState) {
        self.action(variant).set(state);
    }

    fn show_preview(&self, image: &StagedImage) {
        let url = match object_url(image.bytes(), image.mime()) {
            Ok(url) => url,
            Err(e) => {
                log::error!("preview of {} failed: {:?}", image.name(), e);
                String::new()
            }
        };
        let previous = self.preview.get_untracked();
        self.preview.set(Some(Preview {
            name: image.name().to_string(),
            url,
        }));
        if let Some(previous) = previous.filter(|p| !p.url.is_empty()) {
            revoke(&previous.url);
        }
    }

    fn set_surface(&self, surface: DrawingSurface) {
        self.surface.set(surface);
    }

    fn show_classification(&self, display: &ClassificationDisplay) {
        self.classification.set(Some(display.clone()));
    }

    fn show_annotated(&self, variant: Variant, image: &AnnotatedImage) -> Result<()> {
        let slot = self
            .annotated(variant)
            .ok_or_else(|| Error::Body(format!("{} has no image panel", variant.as_str())))?;
        let url = object_url(&image.bytes, &image.mime)
            .map_err(|e| Error::Body(format!("image could not be displayed: {:?}", e)))?;
        replace_url(slot, Some(url));
        Ok(())
    }

    fn set_connectivity(&self, status: &ConnectivityStatus) {
        self.status.set(Some(status.clone()));
    }

    fn clear(&self) {
        if let Some(previous) = self.preview.get_untracked() {
            if !previous.url.is_empty() {
                revoke(&previous.url);
            }
        }
        self.preview.set(None);
        self.surface.set(DrawingSurface::default());
        self.classification.set(None);
        replace_url(self.detection, None);
        replace_url(self.segmentation, None);

        if let Some(input) = self.file_input.get_untracked() {
            input.set_value("");
        }
    }
}
