//! 画面描画（純粋関数）
//!
//! ViewState から HTML / テキストを生成する。値は必ずエスケープする。

use crate::layout::{DESCRIPTION_FIELD, PANEL_FIELDS};
use crate::types::IdentificationResult;
use crate::view::{ResultArea, ViewState};

/// HTML特殊文字のエスケープ
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 結果表示領域のHTML（空なら空文字列）
pub fn render_result_html(area: &ResultArea) -> String {
    match area {
        ResultArea::Empty => String::new(),
        ResultArea::Failure(message) => format!("<p>Error: {}</p>", escape_html(message)),
        ResultArea::Panel(result) => render_panel_html(result),
    }
}

fn render_panel_html(result: &IdentificationResult) -> String {
    let info: String = PANEL_FIELDS
        .iter()
        .map(|field| {
            format!(
                "        <p><span>{}: </span>{}</p>\n",
                field.label,
                escape_html(result.field_value(field.key))
            )
        })
        .collect();

    format!(
        concat!(
            "<div class=\"panel\">\n",
            "  <a data-action=\"reset\">Reset</a>\n",
            "  <a data-action=\"download\">Download</a>\n",
            "</div>\n",
            "<div class=\"download-container\">\n",
            "  <div class=\"predict-container\">\n",
            "    <div class=\"info\">\n",
            "{info}",
            "    </div>\n",
            "    <div class=\"image\">\n",
            "      <img src=\"{image}\" alt=\"Identified Species Image\">\n",
            "    </div>\n",
            "  </div>\n",
            "  <p class=\"description\"><span>{label}: </span>{description}</p>\n",
            "</div>\n",
        ),
        info = info,
        image = escape_html(&result.image),
        label = DESCRIPTION_FIELD.label,
        description = escape_html(&result.description),
    )
}

/// ページ全体のHTML
///
/// `preview_src` を渡すとプレビュー画像の src を差し替える（スタンドアロン出力用）。
pub fn render_html(view: &ViewState, preview_src: Option<&str>) -> String {
    let hidden = |visible: bool| if visible { "block" } else { "none" };

    let preview = match &view.preview {
        Some(p) => {
            let src = preview_src.unwrap_or(p.url.as_str());
            format!(
                "<img id=\"uploadedImage\" src=\"{}\" alt=\"{}\">",
                escape_html(src),
                escape_html(&p.file_name)
            )
        }
        None => String::new(),
    };

    let disabled = if view.submitting { " disabled" } else { "" };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head><meta charset=\"utf-8\"><title>Species Prediction</title></head>\n",
            "<body>\n",
            "<div class=\"left-side\">\n",
            "  <div id=\"imageContainer\" style=\"display: {preview_display}\">{preview}</div>\n",
            "  <button id=\"searchButton\" style=\"display: {submit_display}\"{disabled}>Search</button>\n",
            "</div>\n",
            "<div class=\"right-side\">\n",
            "{result}",
            "</div>\n",
            "</body>\n",
            "</html>\n",
        ),
        preview_display = hidden(view.preview.is_some()),
        preview = preview,
        submit_display = hidden(view.submit_visible),
        disabled = disabled,
        result = render_result_html(&view.result),
    )
}

/// 端末表示用テキスト
pub fn render_text(view: &ViewState) -> String {
    let mut lines = Vec::new();

    if let Some(preview) = &view.preview {
        lines.push(format!("Preview: {}", preview.file_name));
    }

    match &view.result {
        ResultArea::Empty => {}
        ResultArea::Failure(message) => lines.push(format!("Error: {}", message)),
        ResultArea::Panel(result) => {
            lines.push("[Reset] [Download]".to_string());
            for field in PANEL_FIELDS {
                lines.push(format!("{}: {}", field.label, result.field_value(field.key)));
            }
            lines.push(format!("Image: {}", result.image));
            lines.push(format!("{}: {}", DESCRIPTION_FIELD.label, result.description));
        }
    }

    lines.join("\n")
}
