//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

mod support;

use std::time::Duration;

use support::RecordingView;
use tempfile::tempdir;
use tumor_ai::backend::HttpBackend;
use tumor_ai::error::TumorAiError;
use tumor_ai::upload;
use tumor_ai_common::{Client, Error, INVALID_TYPE_MESSAGE};

fn client() -> Client<HttpBackend, RecordingView> {
    let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    Client::new(backend, RecordingView::default())
}

/// 存在しないファイルをステージした場合
#[test]
fn test_stage_nonexistent_file() {
    let client = client();
    let result = upload::stage_path(&client, std::path::Path::new("/nonexistent/scan_12345.png"));
    assert!(matches!(result, Err(TumorAiError::FileNotFound(_))));
    assert!(!client.has_image());
}

/// 対応外の拡張子は警告付きで拒否
#[test]
fn test_stage_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("anim.gif");
    std::fs::write(&path, b"GIF89a").unwrap();

    let client = client();
    let result = upload::stage_path(&client, &path);
    assert!(matches!(
        result,
        Err(TumorAiError::Client(Error::UnsupportedType(_)))
    ));
    assert_eq!(client.view().alerts(), vec![INVALID_TYPE_MESSAGE]);
    assert!(!client.has_image());
}

/// `.tif` はAPIが受け付けないのでステージしない
#[test]
fn test_stage_tif_extension_is_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("brain.TIF");
    std::fs::write(&path, [0x49, 0x49, 0x2a, 0x00]).unwrap();

    let client = client();
    let result = upload::stage_path(&client, &path);
    assert!(matches!(
        result,
        Err(TumorAiError::Client(Error::UnsupportedType(_)))
    ));
    assert!(!client.has_image());
}

/// 対応拡張子のファイルはステージされる
#[test]
fn test_stage_supported_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("brain.TIFF");
    std::fs::write(&path, [0x49, 0x49, 0x2a, 0x00]).unwrap();

    let client = client();
    upload::stage_path(&client, &path).expect("ステージ失敗");
    let state = client.snapshot();
    let staged = state.staged().expect("画像がステージされていない");
    assert_eq!(staged.name(), "brain.TIFF");
    assert_eq!(staged.mime(), "image/tiff");
}

/// TumorAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        TumorAiError::Config("テスト設定エラー".to_string()),
        TumorAiError::FileNotFound("scan.png".to_string()),
        TumorAiError::Disconnected("Cannot connect to API".to_string()),
        TumorAiError::Client(Error::Status(502)),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空");
    }
}

/// 共通エラーはそのままのメッセージで表示
#[test]
fn test_client_error_is_transparent() {
    let err: TumorAiError = Error::Status(404).into();
    assert_eq!(format!("{}", err), "HTTP error! Status: 404");
}

/// JSON解析エラーからの変換
#[test]
fn test_error_from_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: TumorAiError = json_err.into();
    assert!(matches!(err, TumorAiError::JsonParse(_)));
}
