pub mod html;
pub mod pdf;

use crate::error::Result;
use image::DynamicImage;
use species_id_common::{IdentificationResult, PageGeometry, PanelLayout};
use std::path::{Path, PathBuf};

/// 結果パネルのキャプチャ
///
/// 配置済みのテキストと種の画像をひとまとめにしたもの。
#[derive(Debug, Clone)]
pub struct Capture {
    pub layout: PanelLayout,
    pub image: Option<DynamicImage>,
}

/// 文書レンダラの能力
#[allow(async_fn_in_trait)]
pub trait DocumentRenderer {
    async fn capture(&self, panel: &IdentificationResult) -> Result<Capture>;

    /// キャプチャをページ分割した文書のバイト列
    fn paginate(&self, capture: &Capture, geometry: &PageGeometry) -> Result<Vec<u8>>;
}

/// 出力先がディレクトリならファイル名を付け足す
pub fn output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

pub fn write_document(bytes: &[u8], output: &Path, file_name: &str) -> Result<PathBuf> {
    let path = output_path(output, file_name);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, bytes)?;
    Ok(path)
}
