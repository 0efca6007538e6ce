use thiserror::Error;

#[derive(Error, Debug)]
pub enum TumorAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Client(#[from] tumor_ai_common::Error),

    #[error("APIに接続できません: {0}")]
    Disconnected(String),
}

pub type Result<T> = std::result::Result<T, TumorAiError>;
