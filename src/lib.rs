//! 種同定クライアント
//!
//! 画像を Classification Service に送り、返ってきた同定結果を表示・PDF出力する。

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod logging;
pub mod picker;
pub mod service;
pub mod session;
pub mod splash;

pub use controller::{FlowSettings, ResultFlowController, SubmitOutcome};
pub use error::{Result, SpeciesIdError};
