//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use species_id::error::SpeciesIdError;
use species_id::picker::SelectedImage;
use std::path::Path;
use tempfile::tempdir;

/// 存在しない画像を選択した場合
#[test]
fn test_select_nonexistent_image() {
    let result = SelectedImage::load(Path::new("/nonexistent/path/12345.jpg"));
    assert!(matches!(result, Err(SpeciesIdError::FileNotFound(_))));
}

/// ディレクトリを選択した場合
#[test]
fn test_select_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = SelectedImage::load(dir.path());
    assert!(matches!(result, Err(SpeciesIdError::FileNotFound(_))));
}

/// SpeciesIdErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        SpeciesIdError::Config("テスト設定エラー".to_string()),
        SpeciesIdError::FileNotFound("cat.jpg".to_string()),
        SpeciesIdError::UnsupportedImage("notes.txt".to_string()),
        SpeciesIdError::ServiceStatus { status: 502, body: "bad gateway".to_string() },
        SpeciesIdError::ServiceUnavailable,
        SpeciesIdError::PdfGeneration("PDF生成エラー".to_string()),
        SpeciesIdError::NothingToExport,
        SpeciesIdError::NoImageSelected,
        SpeciesIdError::SubmitInFlight,
        SpeciesIdError::Prompt("interrupted".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

#[test]
fn test_service_status_message() {
    let err = SpeciesIdError::ServiceStatus { status: 502, body: "bad gateway".to_string() };
    let display = format!("{}", err);
    assert!(display.contains("502"));
    assert!(display.contains("bad gateway"));
}

/// 通信系エラーの分類
#[test]
fn test_transport_classification() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(SpeciesIdError::JsonParse(json_err).is_transport());
    assert!(SpeciesIdError::ServiceStatus { status: 500, body: String::new() }.is_transport());
    assert!(SpeciesIdError::Common(species_id_common::Error::MalformedResponse("x".into())).is_transport());

    assert!(!SpeciesIdError::NothingToExport.is_transport());
    assert!(!SpeciesIdError::NoImageSelected.is_transport());
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: SpeciesIdError = io_err.into();

    assert!(matches!(err, SpeciesIdError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: SpeciesIdError = json_err.into();

    assert!(matches!(err, SpeciesIdError::JsonParse(_)));
}

/// common::Errorは透過的に表示される
#[test]
fn test_common_error_transparent() {
    let common_err = species_id_common::Error::MalformedResponse("missing field `habitat`".to_string());
    let err: SpeciesIdError = common_err.into();

    assert!(matches!(err, SpeciesIdError::Common(_)));
    assert_eq!(format!("{}", err), "Malformed response: missing field `habitat`");
}
