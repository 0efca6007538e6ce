//! UI更新の境界
//!
//! クライアントは画面要素を直接触らず、このトレイト経由で更新する。

use crate::error::Result;
use crate::render::ClassificationDisplay;
use crate::staging::{DrawingSurface, StagedImage};
use crate::types::{ActionState, AnnotatedImage, ConnectivityStatus, Variant};

pub trait View {
    /// ブロッキングな警告表示
    fn alert(&self, message: &str);

    fn set_action(&self, variant: Variant, state: ActionState);

    /// プレビューとファイル名を表示
    fn show_preview(&self, image: &StagedImage);

    fn set_surface(&self, surface: DrawingSurface);

    fn show_classification(&self, display: &ClassificationDisplay);

    /// 検出・セグメンテーションのパネルを差し替える
    ///
    /// 表示（保存）できなかった場合はエラーを返し、パネルはプレースホルダのまま。
    fn show_annotated(&self, variant: Variant, image: &AnnotatedImage) -> Result<()>;

    fn set_connectivity(&self, status: &ConnectivityStatus);

    /// 全パネル・プレビュー・入力欄を初期状態に戻す
    fn clear(&self);
}
