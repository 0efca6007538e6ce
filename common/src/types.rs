//! 推論クライアントの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Variant: 3種類の推論アクション（分類・検出・セグメンテーション）
//! - Classification: 分類エンドポイントのレスポンス
//! - AnnotatedImage: 検出・セグメンテーションが返す注釈付き画像
//! - ConnectivityStatus: API接続状態

use serde::{Deserialize, Serialize};

/// 疎通確認エンドポイント
pub const HEALTH_ENDPOINT: &str = "/api";

/// multipartのフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// 処理中ボタンのラベル
pub const BUSY_LABEL: &str = "Processing...";

/// 推論アクションの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Classify,
    Detect,
    Segment,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Classify, Variant::Detect, Variant::Segment];

    /// 状態配列のインデックス
    pub fn index(&self) -> usize {
        match self {
            Variant::Classify => 0,
            Variant::Detect => 1,
            Variant::Segment => 2,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Variant::Classify => "/predict_vgg",
            Variant::Detect => "/detect_yolo",
            Variant::Segment => "/segment_sam",
        }
    }

    /// アイドル時のボタンラベル
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Classify => "Predict VGG",
            Variant::Detect => "Detect YOLO",
            Variant::Segment => "Segment SAM",
        }
    }

    /// Font Awesomeのアイコンクラス
    pub fn icon(&self) -> &'static str {
        match self {
            Variant::Classify => "fas fa-search",
            Variant::Detect => "fas fa-crosshairs",
            Variant::Segment => "fas fa-draw-polygon",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Variant::Classify => "Prediction failed. Please try again.",
            Variant::Detect => "Detection failed. Please try again.",
            Variant::Segment => "Segmentation failed. Please try again.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classify => "classify",
            Variant::Detect => "detect",
            Variant::Segment => "segment",
        }
    }
}

/// 分類結果（`/predict_vgg` のレスポンス）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub prediction: String,
    pub confidence: f64,
}

/// 注釈付き画像（`/detect_yolo`, `/segment_sam` のレスポンス）
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl AnnotatedImage {
    /// Content-Typeが無い場合のMIMEタイプ（バックエンドはPNGで返す）
    pub const DEFAULT_MIME: &'static str = "image/png";

    pub fn new(bytes: Vec<u8>, mime: Option<&str>) -> Self {
        let mime = mime
            .map(|m| m.split(';').next().unwrap_or(m).trim())
            .filter(|m| !m.is_empty())
            .unwrap_or(Self::DEFAULT_MIME);
        Self {
            bytes,
            mime: mime.to_string(),
        }
    }

    /// 保存時の拡張子
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            _ => "png",
        }
    }
}

/// 推論アクション1件分の結果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Classification(Classification),
    Annotated(Variant, AnnotatedImage),
}

/// API接続状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityStatus {
    pub connected: bool,
    pub message: String,
}

impl ConnectivityStatus {
    pub fn connected() -> Self {
        Self {
            connected: true,
            message: "API connected".to_string(),
        }
    }

    /// 2xx以外のステータスが返った場合
    pub fn failed() -> Self {
        Self {
            connected: false,
            message: "API connection failed".to_string(),
        }
    }

    /// 通信自体ができなかった場合
    pub fn unreachable() -> Self {
        Self {
            connected: false,
            message: "Cannot connect to API".to_string(),
        }
    }
}

/// アクションボタンの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Disabled,
    Ready,
    Busy,
}

impl ActionState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ActionState::Ready)
    }
}

/// 結果パネルの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Placeholder,
    Populated,
}
