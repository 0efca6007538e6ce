//! 分類結果の表示モデル

use crate::types::Classification;

/// 信頼度による色分け
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            ConfidenceTier::High
        } else if confidence > 0.5 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// バーの塗りつぶし（CSS background）
    pub fn gradient(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "linear-gradient(to right, #ff6b6b, #ff4757)",
            ConfidenceTier::Medium => "linear-gradient(to right, #ffa502, #ff7f00)",
            ConfidenceTier::Low => "linear-gradient(to right, #2ed573, #1dd1a1)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

/// 信頼度を小数2桁のパーセント表記にする（例: 0.95 -> "95.00%"）
pub fn format_percent(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// 分類パネルに描画する内容
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationDisplay {
    pub label: String,
    pub percent_text: String,
    /// バー幅（0〜100に丸め込み済み）
    pub fill_percent: f64,
    pub tier: ConfidenceTier,
}

impl ClassificationDisplay {
    pub fn fill_style(&self) -> String {
        format!(
            "width: {:.2}%; background: {}",
            self.fill_percent,
            self.tier.gradient()
        )
    }
}

impl From<&Classification> for ClassificationDisplay {
    fn from(result: &Classification) -> Self {
        let percent = result.confidence * 100.0;
        let fill_percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        Self {
            label: result.prediction.clone(),
            percent_text: format_percent(result.confidence),
            fill_percent,
            tier: ConfidenceTier::from_confidence(result.confidence),
        }
    }
}
