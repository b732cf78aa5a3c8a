//! 画面のスタンドアロンHTML出力
//!
//! プレビューの blob: URL はファイル外では解決できないため data: URL に置き換える。
//! 種画像のサービス上のパスはサービスの絶対URLに直す。

use crate::error::Result;
use crate::service::resolve_image_url;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use species_id_common::{render_html, ObjectUrlStore, ResultArea, ViewState};
use std::path::Path;

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

pub fn render_standalone(view: &ViewState, store: &ObjectUrlStore, service_url: &str) -> String {
    let mut view = view.clone();
    if let ResultArea::Panel(result) = &mut view.result {
        if is_service_path(&result.image) {
            result.image = resolve_image_url(service_url, &result.image);
        }
    }

    let preview_src = view
        .preview
        .as_ref()
        .and_then(|p| store.resolve(&p.url))
        .map(|blob| data_url(&blob.mime, &blob.bytes));

    render_html(&view, preview_src.as_deref())
}

fn is_service_path(location: &str) -> bool {
    !location.is_empty() && !location.starts_with("file://") && !location.starts_with("data:")
}

pub fn write_html(view: &ViewState, store: &ObjectUrlStore, service_url: &str, path: &Path) -> Result<()> {
    std::fs::write(path, render_standalone(view, store, service_url))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use species_id_common::Preview;

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_preview_embedded() {
        let mut store = ObjectUrlStore::new();
        let url = store.create("image/jpeg", b"abc".to_vec());
        let view = ViewState {
            preview: Some(Preview {
                url,
                file_name: "cat.jpg".into(),
            }),
            submit_visible: true,
            ..Default::default()
        };

        let html = render_standalone(&view, &store, "http://host:5000");
        assert!(html.contains("data:image/jpeg;base64,YWJj"));
        assert!(!html.contains("blob:"));
    }

    #[test]
    fn test_species_image_made_absolute() {
        let panel = species_id_common::IdentificationResult {
            common_name: "Cat".into(),
            image: "/img/cat.jpg".into(),
            ..Default::default()
        };
        let view = ViewState {
            result: ResultArea::Panel(panel),
            ..Default::default()
        };

        let html = render_standalone(&view, &ObjectUrlStore::new(), "http://host:5000/");
        assert!(html.contains("src=\"http://host:5000/img/cat.jpg\""));
        // 画面の状態は書き換えない
        assert_eq!(view.panel().map(|p| p.image.as_str()), Some("/img/cat.jpg"));
    }

    #[test]
    fn test_absolute_species_image_kept() {
        let panel = species_id_common::IdentificationResult {
            image: "https://cdn.test/cat.jpg".into(),
            ..Default::default()
        };
        let view = ViewState {
            result: ResultArea::Panel(panel),
            ..Default::default()
        };

        let html = render_standalone(&view, &ObjectUrlStore::new(), "http://host:5000");
        assert!(html.contains("src=\"https://cdn.test/cat.jpg\""));
    }
}
