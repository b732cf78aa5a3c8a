//! Species ID Common Library
//!
//! CLIと他のフロントエンドで共有される型・画面状態・ページ計算

pub mod error;
pub mod layout;
pub mod object_url;
pub mod render;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use layout::{PageGeometry, PanelLayout, PANEL_FIELDS};
pub use object_url::{ObjectUrl, ObjectUrlStore};
pub use render::{render_html, render_result_html, render_text};
pub use types::{IdentificationResult, ServiceResponse};
pub use view::{Action, FlowPhase, Preview, ResultArea, ViewState};
