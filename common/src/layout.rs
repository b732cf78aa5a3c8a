//! レイアウト設定モジュール
//!
//! 結果パネルの表示フィールド定義と、PDF出力のページ計算（pt基準）

// ============================================
// フィールド定義
// ============================================

/// 結果パネルに表示するフィールド
#[derive(Debug, Clone, Copy)]
pub struct FieldDefinition {
    pub key: &'static str,
    pub label: &'static str,
}

/// 画像と並べて表示する情報欄（表示順固定）
pub const PANEL_FIELDS: &[FieldDefinition] = &[
    FieldDefinition { key: "category", label: "Category" },
    FieldDefinition { key: "common_name", label: "Common Name" },
    FieldDefinition { key: "family_name", label: "Family Name" },
    FieldDefinition { key: "scientific_name", label: "Scientific Name" },
    FieldDefinition { key: "height", label: "Height" },
    FieldDefinition { key: "weight", label: "Weight" },
    FieldDefinition { key: "habitat", label: "Habitat" },
    FieldDefinition { key: "lifespan", label: "Lifespan" },
];

/// 情報欄の後に続く説明行
pub const DESCRIPTION_FIELD: FieldDefinition = FieldDefinition {
    key: "description",
    label: "Description",
};

// ============================================
// パネル寸法（pt）
// ============================================

pub const PANEL_FONT_SIZE_PT: f32 = 11.0;
pub const PANEL_LINE_HEIGHT_PT: f32 = 18.0;
pub const PANEL_GAP_PT: f32 = 12.0;

/// 情報欄の幅比率（残りが画像）
pub const INFO_RATIO: f32 = 0.55;

/// Helvetica の平均文字幅（フォントサイズ比）
const AVG_CHAR_WIDTH_RATIO: f32 = 0.5;

/// PDF出力の余白（pt）
pub const EXPORT_MARGIN_PT: f32 = 30.0;

/// 縦横比（ページ高さ = 幅 × 1.5 + 余白×2）
pub const PAGE_ASPECT: f32 = 1.5;

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

// ============================================
// パネル配置
// ============================================

/// パネル内の1行テキスト（座標はパネル左上基準、y はベースライン）
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x_pt: f32,
    pub baseline_pt: f32,
    pub size_pt: f32,
}

/// パネル内の矩形（左上基準）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x_pt: f32,
    pub y_pt: f32,
    pub width_pt: f32,
    pub height_pt: f32,
}

/// 結果パネルの配置計算結果
#[derive(Debug, Clone)]
pub struct PanelLayout {
    pub width_pt: f32,
    pub height_pt: f32,
    pub text_runs: Vec<TextRun>,
    pub image_box: Rect,
}

impl PanelLayout {
    /// 情報欄・画像・説明の配置を計算
    ///
    /// `image_px` は画像のピクセル寸法（不明なら正方形扱い）
    pub fn compute(
        width_pt: f32,
        fields: &[(&str, &str)],
        description: &str,
        image_px: Option<(u32, u32)>,
    ) -> Self {
        let info_width = width_pt * INFO_RATIO;

        let mut text_runs: Vec<TextRun> = fields
            .iter()
            .enumerate()
            .map(|(row, (label, value))| TextRun {
                text: format!("{}: {}", label, value),
                x_pt: 0.0,
                baseline_pt: row as f32 * PANEL_LINE_HEIGHT_PT + PANEL_FONT_SIZE_PT,
                size_pt: PANEL_FONT_SIZE_PT,
            })
            .collect();

        let image_x = info_width + PANEL_GAP_PT;
        let image_width = (width_pt - image_x).max(0.0);
        let image_height = match image_px {
            Some((w, h)) if w > 0 => image_width * h as f32 / w as f32,
            _ => image_width,
        };
        let image_box = Rect {
            x_pt: image_x,
            y_pt: 0.0,
            width_pt: image_width,
            height_pt: image_height,
        };

        let info_height = fields.len() as f32 * PANEL_LINE_HEIGHT_PT;
        let description_top = info_height.max(image_height) + PANEL_GAP_PT;

        let description_text = format!("{}: {}", DESCRIPTION_FIELD.label, description);
        let max_chars = (width_pt / (PANEL_FONT_SIZE_PT * AVG_CHAR_WIDTH_RATIO)).floor() as usize;
        let lines = wrap_text(&description_text, max_chars.max(1));
        for (row, line) in lines.iter().enumerate() {
            text_runs.push(TextRun {
                text: line.clone(),
                x_pt: 0.0,
                baseline_pt: description_top + row as f32 * PANEL_LINE_HEIGHT_PT + PANEL_FONT_SIZE_PT,
                size_pt: PANEL_FONT_SIZE_PT,
            });
        }

        let height_pt = description_top + lines.len() as f32 * PANEL_LINE_HEIGHT_PT;

        Self {
            width_pt,
            height_pt,
            text_runs,
            image_box,
        }
    }
}

/// 単語単位の折り返し（長すぎる単語は文字単位で分割）
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(max_chars).collect();
            word = word.chars().skip(max_chars).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// ============================================
// PDFページ計算
// ============================================

/// PDF出力のページ寸法（pt）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub margin_pt: f32,
    pub content_width_pt: f32,
    pub content_height_pt: f32,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// 1ページ目以降に追加するページ数
    pub extra_pages: usize,
}

impl PageGeometry {
    pub fn for_content(content_width_pt: f32, content_height_pt: f32) -> Self {
        let margin_pt = EXPORT_MARGIN_PT;
        let page_width_pt = content_width_pt + margin_pt * 2.0;
        let page_height_pt = page_width_pt * PAGE_ASPECT + margin_pt * 2.0;

        Self {
            margin_pt,
            content_width_pt,
            content_height_pt,
            page_width_pt,
            page_height_pt,
            extra_pages: extra_pages(content_height_pt, page_height_pt),
        }
    }

    pub fn page_count(&self) -> usize {
        1 + self.extra_pages
    }

    /// ページ上端からキャプチャ上端までの距離（pt、負なら上にはみ出す）
    ///
    /// 2ページ目以降は同じキャプチャ全体を1ページ分ずつ上にずらして配置する。
    pub fn content_top_pt(&self, page_index: usize) -> f32 {
        if page_index == 0 {
            self.margin_pt
        } else {
            -(self.page_height_pt * page_index as f32) + self.margin_pt * 4.0
        }
    }
}

/// 追加ページ数 = ceil(H / P) - 1（負にはしない）
pub fn extra_pages(content_height_pt: f32, page_height_pt: f32) -> usize {
    if page_height_pt <= 0.0 || content_height_pt <= 0.0 {
        return 0;
    }
    let pages = (content_height_pt / page_height_pt).ceil() - 1.0;
    if pages > 0.0 {
        pages as usize
    } else {
        0
    }
}
