//! 結果パネルのPDF出力
//!
//! パネル全体を1枚のキャプチャとして扱い、ページごとに同じキャプチャを
//! 1ページ分ずつ上にずらして配置する（はみ出した部分はページ外で切れる）。

use super::{Capture, DocumentRenderer};
use crate::error::{Result, SpeciesIdError};
use crate::service::HttpClassifier;
use image::{DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
};
use species_id_common::layout::{pt_to_mm, PanelLayout, PANEL_FONT_SIZE_PT};
use species_id_common::{IdentificationResult, PageGeometry, PANEL_FIELDS};
use std::path::Path;

const LAYER_NAME: &str = "Layer 1";
const IMAGE_DPI: f32 = 72.0;
const IMAGE_PLACEHOLDER: &str = "[image unavailable]";
const FILE_SCHEME: &str = "file://";

/// printpdf によるレンダラ
pub struct PdfRenderer {
    title: String,
    panel_width_pt: f32,
    fetcher: Option<HttpClassifier>,
}

impl PdfRenderer {
    pub fn new(title: &str, panel_width_pt: f32) -> Self {
        Self {
            title: title.to_string(),
            panel_width_pt,
            fetcher: None,
        }
    }

    /// 相対パス・URLの画像をサービスから取得できるようにする
    pub fn with_fetcher(mut self, fetcher: HttpClassifier) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// 結果の `image` を読み込む
    ///
    /// サービスがある場合はサービス上のパスとして取得する。ローカルファイルは
    /// `file://` 指定か、サービスなしで描画するときだけ読む。
    async fn load_image(&self, location: &str) -> Option<DynamicImage> {
        if location.is_empty() {
            return None;
        }

        let bytes = match (location.strip_prefix(FILE_SCHEME), &self.fetcher) {
            (Some(path), _) => read_local(location, Path::new(path))?,
            (None, Some(fetcher)) => match fetcher.fetch_image(location).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(%location, error = %e, "failed to fetch species image");
                    return None;
                }
            },
            (None, None) => read_local(location, Path::new(location))?,
        };

        match image::load_from_memory(&bytes) {
            Ok(img) => Some(DynamicImage::ImageRgb8(img.to_rgb8())),
            Err(e) => {
                tracing::warn!(%location, error = %e, "failed to decode species image");
                None
            }
        }
    }
}

fn read_local(location: &str, path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(%location, error = %e, "failed to read species image");
            None
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    async fn capture(&self, panel: &IdentificationResult) -> Result<Capture> {
        let image = self.load_image(&panel.image).await;

        let fields: Vec<(&str, &str)> = PANEL_FIELDS
            .iter()
            .map(|field| (field.label, panel.field_value(field.key)))
            .collect();
        let layout = PanelLayout::compute(
            self.panel_width_pt,
            &fields,
            &panel.description,
            image.as_ref().map(|img| img.dimensions()),
        );

        Ok(Capture { layout, image })
    }

    fn paginate(&self, capture: &Capture, geometry: &PageGeometry) -> Result<Vec<u8>> {
        let page_width = Mm(pt_to_mm(geometry.page_width_pt));
        let page_height = Mm(pt_to_mm(geometry.page_height_pt));

        let (doc, page1, layer1) = PdfDocument::new(self.title.as_str(), page_width, page_height, LAYER_NAME);

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| SpeciesIdError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;

        for page_index in 0..geometry.page_count() {
            let layer = if page_index == 0 {
                doc.get_page(page1).get_layer(layer1)
            } else {
                let (page, layer) = doc.add_page(page_width, page_height, LAYER_NAME);
                doc.get_page(page).get_layer(layer)
            };

            let top = geometry.content_top_pt(page_index);
            draw_capture(&layer, &font, capture, geometry, top);
        }

        doc.save_to_bytes()
            .map_err(|e| SpeciesIdError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))
    }
}

/// キャプチャ1枚をページに配置（top はページ上端からのキャプチャ上端位置）
fn draw_capture(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    capture: &Capture,
    geometry: &PageGeometry,
    top: f32,
) {
    let left = geometry.margin_pt;
    // ページ上端基準 → PDF座標（左下原点）
    let to_pdf_y = |y_from_top: f32| geometry.page_height_pt - (top + y_from_top);

    for run in &capture.layout.text_runs {
        layer.use_text(
            run.text.clone(),
            run.size_pt,
            Mm(pt_to_mm(left + run.x_pt)),
            Mm(pt_to_mm(to_pdf_y(run.baseline_pt))),
            font,
        );
    }

    let image_box = capture.layout.image_box;
    match &capture.image {
        Some(img) if img.dimensions().0 > 0 && img.dimensions().1 > 0 => {
            let (px_width, px_height) = img.dimensions();
            let scale_x = image_box.width_pt / px_width as f32;
            let scale_y = image_box.height_pt / px_height as f32;
            let bottom = to_pdf_y(image_box.y_pt + image_box.height_pt);

            Image::from_dynamic_image(img).add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(pt_to_mm(left + image_box.x_pt))),
                    translate_y: Some(Mm(pt_to_mm(bottom))),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    dpi: Some(IMAGE_DPI),
                    ..Default::default()
                },
            );
        }
        _ => {
            layer.use_text(
                IMAGE_PLACEHOLDER,
                PANEL_FONT_SIZE_PT,
                Mm(pt_to_mm(left + image_box.x_pt)),
                Mm(pt_to_mm(to_pdf_y(image_box.y_pt + PANEL_FONT_SIZE_PT))),
                font,
            );
        }
    }
}
