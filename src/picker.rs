//! 画像ファイル選択
//!
//! ホスト環境にファイルを1つ選ばせる能力を FilePicker として抽象化する。

use crate::error::{Result, SpeciesIdError};
use dialoguer::Input;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// ファイル選択の能力。1回の呼び出しで0件または1件を返す
pub trait FilePicker {
    fn pick(&mut self) -> Result<Option<PathBuf>>;
}

/// あらかじめ与えたパスを順に返す
#[derive(Debug, Default)]
pub struct PathPicker {
    queue: VecDeque<PathBuf>,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_paths([path.into()])
    }

    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            queue: paths.into_iter().collect(),
        }
    }
}

impl FilePicker for PathPicker {
    fn pick(&mut self) -> Result<Option<PathBuf>> {
        Ok(self.queue.pop_front())
    }
}

/// 端末でパスを入力させる（空入力は選択なし）
#[derive(Debug, Default)]
pub struct PromptPicker;

impl FilePicker for PromptPicker {
    fn pick(&mut self) -> Result<Option<PathBuf>> {
        let input: String = Input::new()
            .with_prompt("画像ファイルのパス（空でキャンセル）")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SpeciesIdError::Prompt(e.to_string()))?;

        let trimmed = input.trim().trim_matches('"');
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(trimmed)))
        }
    }
}

/// 選択済み画像（ローカルのバイト列）
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Arc<[u8]>,
}

impl SelectedImage {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SpeciesIdError::FileNotFound(path.display().to_string()));
        }

        let mime = path
            .extension()
            .and_then(|ext| mime_for_extension(&ext.to_string_lossy()))
            .ok_or_else(|| SpeciesIdError::UnsupportedImage(path.display().to_string()))?;

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime,
            bytes: bytes.into(),
        })
    }
}

fn is_image_extension(ext: &str) -> bool {
    let lower = ext.to_lowercase();
    IMAGE_EXTENSIONS.contains(&lower.as_str())
}

pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    if !is_image_extension(ext) {
        return None;
    }
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
