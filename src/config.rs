use crate::error::{Result, SpeciesIdError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const SERVICE_URL_ENV: &str = "SPECIES_ID_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification Service のベースURL
    pub service_url: String,
    /// 画像を載せるマルチパートのフィールド名
    pub image_field: String,
    /// 画像と一緒に送るフォーム項目
    pub extra_fields: BTreeMap<String, String>,
    /// リクエストのタイムアウト（未設定なら無制限）
    pub timeout_seconds: Option<u64>,
    pub splash_delay_ms: u64,
    pub pdf_file_name: String,
    /// 結果パネルの幅（pt）
    pub panel_width_pt: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:5000".into(),
            image_field: "image".into(),
            extra_fields: BTreeMap::new(),
            timeout_seconds: None,
            splash_delay_ms: 4500,
            pdf_file_name: "Your_PDF_Name.pdf".into(),
            panel_width_pt: 540.0,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SpeciesIdError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("species-id").join("config.json"))
    }

    /// 接続先URL（環境変数を優先）
    pub fn service_url(&self) -> String {
        match std::env::var(SERVICE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => self.service_url.clone(),
        }
    }

    pub fn set_service_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SpeciesIdError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.service_url = url.trim_end_matches('/').to_string();
        self.save()
    }

    pub fn splash_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.splash_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.image_field, "image");
        assert_eq!(config.splash_delay_ms, 4500);
        assert_eq!(config.pdf_file_name, "Your_PDF_Name.pdf");
        assert!(config.timeout_seconds.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"service_url": "http://example.test:8080"}"#).unwrap();
        assert_eq!(config.service_url, "http://example.test:8080");
        assert_eq!(config.image_field, "image");
        assert_eq!(config.panel_width_pt, 540.0);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = Config::default();
        let err = config.set_service_url("ftp://example.test".into()).unwrap_err();
        assert!(matches!(err, SpeciesIdError::Config(_)));
    }
}
