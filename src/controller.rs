//! 結果フロー制御
//!
//! 画像選択 → 送信 → 結果表示 → リセット / PDF出力 の1サイクルを管理する。
//! 画面状態は ViewState に集約し、外部とのやり取りは注入された
//! FilePicker / ClassificationService / DocumentRenderer を通して行う。

use crate::config::Config;
use crate::error::{Result, SpeciesIdError};
use crate::export::{write_document, DocumentRenderer};
use crate::picker::{FilePicker, SelectedImage};
use crate::service::{ClassificationService, ImageUpload};
use species_id_common::{ObjectUrlStore, PageGeometry, Preview, ResultArea, ServiceResponse, ViewState};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// フローの設定値
#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub image_field: String,
    pub extra_fields: BTreeMap<String, String>,
    pub pdf_file_name: String,
    pub output_dir: PathBuf,
}

impl FlowSettings {
    pub fn from_config(config: &Config, output_dir: PathBuf) -> Self {
        Self {
            image_field: config.image_field.clone(),
            extra_fields: config.extra_fields.clone(),
            pdf_file_name: config.pdf_file_name.clone(),
            output_dir,
        }
    }
}

/// 送信1回分（complete_submit で照合する）
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub id: u64,
    pub upload: ImageUpload,
}

/// 送信結果の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// パネルを表示した
    Identified,
    /// サービスのエラーを表示した
    Rejected,
    /// 通信・応答解釈に失敗（ログのみ、画面は変えない）
    Unreachable,
    /// リセット後に届いた古い応答（破棄）
    Discarded,
}

pub struct ResultFlowController<P, S, R> {
    picker: P,
    service: S,
    renderer: R,
    settings: FlowSettings,
    view: ViewState,
    urls: ObjectUrlStore,
    selected: Option<SelectedImage>,
    next_submission: u64,
    in_flight: Option<u64>,
}

impl<P, S, R> ResultFlowController<P, S, R>
where
    P: FilePicker,
    S: ClassificationService,
    R: DocumentRenderer,
{
    pub fn new(picker: P, service: S, renderer: R, settings: FlowSettings) -> Self {
        Self {
            picker,
            service,
            renderer,
            settings,
            view: ViewState::default(),
            urls: ObjectUrlStore::new(),
            selected: None,
            next_submission: 0,
            in_flight: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn urls(&self) -> &ObjectUrlStore {
        &self.urls
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// 画像を1枚選択する。選ばれなければ何も変えずに false
    pub fn select_image(&mut self) -> Result<bool> {
        let Some(path) = self.picker.pick()? else {
            tracing::debug!("no file selected");
            return Ok(false);
        };

        let image = SelectedImage::load(&path)?;
        let url = self.urls.create(image.mime, image.bytes.clone());

        if let Some(old) = self.view.preview.take() {
            self.urls.revoke(&old.url);
        }

        tracing::info!(file = %image.file_name, %url, "image selected");
        self.view.preview = Some(Preview {
            url,
            file_name: image.file_name.clone(),
        });
        self.view.submit_visible = true;
        self.selected = Some(image);
        Ok(true)
    }

    /// 送信を開始する（送信中は送信ボタンを隠す）
    pub fn begin_submit(&mut self) -> Result<PendingSubmission> {
        if self.in_flight.is_some() {
            return Err(SpeciesIdError::SubmitInFlight);
        }
        let image = match (&self.selected, self.view.submit_visible) {
            (Some(image), true) => image,
            _ => return Err(SpeciesIdError::NoImageSelected),
        };

        let upload = ImageUpload {
            field_name: self.settings.image_field.clone(),
            file_name: image.file_name.clone(),
            mime: image.mime,
            bytes: image.bytes.clone(),
            extra_fields: self.settings.extra_fields.clone(),
        };

        self.next_submission += 1;
        let id = self.next_submission;
        self.in_flight = Some(id);
        self.view.submitting = true;

        Ok(PendingSubmission { id, upload })
    }

    /// 応答を画面に反映する（1応答につき描画は1回）
    pub fn complete_submit(&mut self, id: u64, response: Result<ServiceResponse>) -> SubmitOutcome {
        if self.in_flight != Some(id) {
            tracing::debug!(id, "discarding stale response");
            return SubmitOutcome::Discarded;
        }
        self.in_flight = None;
        self.view.submitting = false;

        match response {
            Ok(ServiceResponse::Identified(result)) => {
                tracing::info!(common_name = %result.common_name, "species identified");
                self.view.result = ResultArea::Panel(result);
                SubmitOutcome::Identified
            }
            Ok(ServiceResponse::Rejected(message)) => {
                tracing::info!(%message, "service rejected image");
                self.view.result = ResultArea::Failure(message);
                SubmitOutcome::Rejected
            }
            Err(e) if e.is_transport() => {
                tracing::error!(error = %e, "error identifying species");
                SubmitOutcome::Unreachable
            }
            Err(e) => {
                tracing::error!(error = %e, "identification failed before reaching the service");
                SubmitOutcome::Unreachable
            }
        }
    }

    /// 選択中の画像を送信して結果を表示する
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let pending = self.begin_submit()?;
        let response = self.service.identify(&pending.upload).await;
        Ok(self.complete_submit(pending.id, response))
    }

    /// 初期状態に戻す（何度呼んでも同じ）
    pub fn reset(&mut self) {
        if let Some(preview) = self.view.preview.take() {
            self.urls.revoke(&preview.url);
        }
        self.selected = None;
        self.in_flight = None;
        self.view = ViewState::default();
    }

    /// 表示中の結果パネルをPDFに出力する
    pub async fn export_result(&self) -> Result<PathBuf> {
        let panel = self.view.panel().ok_or(SpeciesIdError::NothingToExport)?;

        let capture = self.renderer.capture(panel).await?;
        let geometry = PageGeometry::for_content(capture.layout.width_pt, capture.layout.height_pt);
        let bytes = self.renderer.paginate(&capture, &geometry)?;

        let path = write_document(&bytes, &self.settings.output_dir, &self.settings.pdf_file_name)?;
        tracing::info!(path = %path.display(), pages = geometry.page_count(), "result exported");
        Ok(path)
    }
}
