use super::{ClassificationService, ImageUpload};
use crate::error::{Result, SpeciesIdError};
use reqwest::multipart::{Form, Part};
use species_id_common::ServiceResponse;
use std::time::Duration;

const IDENTIFY_PATH: &str = "/identify_species";
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP経由の Classification Service
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClassifier {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, IDENTIFY_PATH)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 結果の `image` が指す画像を取得
    pub async fn fetch_image(&self, location: &str) -> Result<Vec<u8>> {
        let url = resolve_image_url(&self.base_url, location);
        tracing::debug!(%url, "fetching species image");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

impl ClassificationService for HttpClassifier {
    async fn identify(&self, upload: &ImageUpload) -> Result<ServiceResponse> {
        let part = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str(upload.mime)?;

        let mut form = Form::new().part(upload.field_name.clone(), part);
        for (key, value) in &upload.extra_fields {
            form = form.text(key.clone(), value.clone());
        }

        let url = self.endpoint();
        tracing::debug!(%url, file = %upload.file_name, bytes = upload.bytes.len(), "posting image");

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), len = body.len(), "service responded");

        // エラーステータスでも {"error": ...} が返ればそのまま表示に回す
        match ServiceResponse::parse(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(SpeciesIdError::ServiceStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

/// 絶対URLはそのまま、それ以外はサービスのベースURLからの相対パスとして解決
pub fn resolve_image_url(base_url: &str, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        location.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            location.trim_start_matches('/')
        )
    }
}
