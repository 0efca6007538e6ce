//! 推論バックエンドとの境界
//!
//! HTTPの実装はプラットフォームごとに異なる（CLI: reqwest、Web: fetch）。
//! ステータス判定とJSON解析はここで共通化する。

use crate::error::{Error, Result};
use crate::staging::StagedImage;
use crate::types::{AnnotatedImage, Classification, Variant};

/// 推論APIの呼び出し
///
/// WASMのfutureは`Send`ではないため、`Send`境界は付けない。
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// `GET /api`
    async fn health(&self) -> Result<()>;

    /// `POST /predict_vgg`
    async fn classify(&self, image: &StagedImage) -> Result<Classification>;

    /// `POST /detect_yolo` または `POST /segment_sam`
    async fn annotate(&self, variant: Variant, image: &StagedImage) -> Result<AnnotatedImage>;
}

/// 2xx以外はエラー
pub fn check_status(status: u16) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(Error::Status(status))
    }
}

/// 分類レスポンスのJSONを解析
pub fn parse_classification(body: &[u8]) -> Result<Classification> {
    Ok(serde_json::from_slice(body)?)
}

/// ベースURLとエンドポイントを連結
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
