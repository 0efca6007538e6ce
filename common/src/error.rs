//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 入力検証エラー（`UnsupportedType`, `NoImage`）と
/// 通信・レスポンス解析エラーの2系統に分かれる。
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("No image staged")]
    NoImage,

    #[error("HTTP error! Status: {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response error: {0}")]
    Body(String),
}

impl Error {
    /// ネットワーク呼び出し前に検出される入力検証エラーか
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::UnsupportedType(_) | Error::NoImage)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
