//! 画像ファイルの読み込みとステージング

use std::path::Path;

use tumor_ai_common::{mime_from_path, Backend, Client, View};

use crate::error::{Result, TumorAiError};

/// 拡張子が未知のファイルに付けるMIMEタイプ（ステージングで拒否される）
const UNKNOWN_MIME: &str = "application/octet-stream";

/// 画像ファイルを読み込んでクライアントにステージする
pub fn stage_path<B: Backend, V: View>(client: &Client<B, V>, path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(TumorAiError::FileNotFound(path.display().to_string()));
    }

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime = mime_from_path(path).unwrap_or(UNKNOWN_MIME);
    let bytes = std::fs::read(path)?;
    tracing::debug!("read {} ({} bytes, {})", path.display(), bytes.len(), mime);

    client.stage_file(&name, mime, bytes)?;
    Ok(())
}
