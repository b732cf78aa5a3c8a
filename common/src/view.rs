//! 画面状態
//!
//! 画面全体の可変状態はこの構造体に集約し、描画は render モジュールの
//! 純粋関数で行う。

use crate::object_url::ObjectUrl;
use crate::types::IdentificationResult;

/// 選択中画像のプレビュー
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub url: ObjectUrl,
    pub file_name: String,
}

/// 結果表示領域
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultArea {
    #[default]
    Empty,
    /// `Error: ...` のみの最小表示
    Failure(String),
    /// 全フィールドのパネル表示
    Panel(IdentificationResult),
}

/// 画面の観測可能なフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Empty,
    ImageSelected,
    ResultShown,
    FailureShown,
}

/// 画面状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Some のときプレビュー領域を表示
    pub preview: Option<Preview>,
    pub submit_visible: bool,
    /// 送信中（送信ボタンは無効）
    pub submitting: bool,
    pub result: ResultArea,
}

impl ViewState {
    pub fn phase(&self) -> FlowPhase {
        match &self.result {
            ResultArea::Panel(_) => FlowPhase::ResultShown,
            ResultArea::Failure(_) => FlowPhase::FailureShown,
            ResultArea::Empty if self.preview.is_some() => FlowPhase::ImageSelected,
            ResultArea::Empty => FlowPhase::Empty,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.submit_visible && !self.submitting && self.preview.is_some()
    }

    pub fn panel(&self) -> Option<&IdentificationResult> {
        match &self.result {
            ResultArea::Panel(result) => Some(result),
            _ => None,
        }
    }

    /// 現在表示されている操作
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = vec![Action::Select];
        if self.can_submit() {
            actions.push(Action::Submit);
        }
        if self.panel().is_some() {
            actions.push(Action::Reset);
            actions.push(Action::Download);
        }
        actions.push(Action::Quit);
        actions
    }
}

/// ユーザー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select,
    Submit,
    Reset,
    Download,
    Quit,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Select => "Choose image",
            Action::Submit => "Search",
            Action::Reset => "Reset",
            Action::Download => "Download",
            Action::Quit => "Quit",
        }
    }
}
