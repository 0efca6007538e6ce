use crate::error::{TumorAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 接続先URLの環境変数
pub const URL_ENV: &str = "TUMOR_AI_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TumorAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("tumor-ai").join("config.json"))
    }

    /// 接続先URL（優先順: 引数 > 環境変数 > 設定ファイル）
    pub fn resolve_base_url(&self, cli_url: Option<&str>) -> String {
        let env_url = std::env::var(URL_ENV).ok();
        self.resolve_base_url_with(cli_url, env_url.as_deref())
    }

    /// 空白だけの環境変数は未設定扱い
    pub fn resolve_base_url_with(&self, cli_url: Option<&str>, env_url: Option<&str>) -> String {
        cli_url
            .or(env_url.filter(|url| !url.trim().is_empty()))
            .unwrap_or(&self.base_url)
            .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TumorAiError::Config(format!(
                "URLはhttp://またはhttps://で始めてください: {}",
                url
            )));
        }
        self.base_url = url;
        Ok(())
    }
}
