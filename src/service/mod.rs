//! Classification Service 連携
//!
//! 画像1枚をマルチパートで送り、同定結果またはエラーを受け取る。

mod http;

pub use http::{resolve_image_url, HttpClassifier};

use crate::error::Result;
use species_id_common::ServiceResponse;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 送信する1件分のフォーム
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub field_name: String,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Arc<[u8]>,
    pub extra_fields: BTreeMap<String, String>,
}

/// 同定サービスの能力
#[allow(async_fn_in_trait)]
pub trait ClassificationService {
    /// 通信失敗・応答不正は Err、サービス側のエラーは Ok(Rejected)
    async fn identify(&self, upload: &ImageUpload) -> Result<ServiceResponse>;
}
