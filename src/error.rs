use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeciesIdError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("サービスがエラーステータスを返しました: {status} {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("同定サービスから有効な応答を得られませんでした")]
    ServiceUnavailable,

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("出力できる結果がありません。先に画像を送信してください")]
    NothingToExport,

    #[error("画像が選択されていません")]
    NoImageSelected,

    #[error("送信中です。応答を待ってください")]
    SubmitInFlight,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] species_id_common::Error),
}

impl SpeciesIdError {
    /// 通信・応答解釈の失敗（画面は変えずにログだけ残す種類）
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SpeciesIdError::Http(_)
                | SpeciesIdError::ServiceStatus { .. }
                | SpeciesIdError::JsonParse(_)
                | SpeciesIdError::Common(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SpeciesIdError>;
