//! 対話式の予測画面
//!
//! 表示中の操作だけを選択肢として出し、選ばれた操作をコントローラに渡す。

use crate::controller::{ResultFlowController, SubmitOutcome};
use crate::error::{Result, SpeciesIdError};
use crate::export::DocumentRenderer;
use crate::picker::FilePicker;
use crate::service::ClassificationService;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use species_id_common::{render_text, Action};
use std::time::Duration;

/// 操作後にループを続けるか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn run_session<P, S, R>(controller: &mut ResultFlowController<P, S, R>) -> Result<()>
where
    P: FilePicker,
    S: ClassificationService,
    R: DocumentRenderer,
{
    loop {
        let text = render_text(controller.view());
        if !text.is_empty() {
            println!("\n{}\n", text);
        }

        let actions = controller.view().actions();
        let action = prompt_action(&actions)?;

        match dispatch(controller, action).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            // 1回の操作の失敗で終了はしない
            Err(e) => println!("✗ {}", e),
        }
    }

    Ok(())
}

/// 1操作を実行
pub async fn dispatch<P, S, R>(
    controller: &mut ResultFlowController<P, S, R>,
    action: Action,
) -> Result<Flow>
where
    P: FilePicker,
    S: ClassificationService,
    R: DocumentRenderer,
{
    match action {
        Action::Select => {
            if controller.select_image()? {
                if let Some(image) = controller.selected() {
                    println!("✔ 画像を選択: {}", image.file_name);
                }
            }
        }
        Action::Submit => {
            let spinner = spinner("同定中...");
            let outcome = controller.submit().await;
            spinner.finish_and_clear();

            if outcome? == SubmitOutcome::Unreachable {
                println!("✗ サービスに接続できませんでした（詳細はログを参照）");
            }
        }
        Action::Reset => controller.reset(),
        Action::Download => {
            let path = controller.export_result().await?;
            println!("✔ PDF出力: {}", path.display());
        }
        Action::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn prompt_action(actions: &[Action]) -> Result<Action> {
    let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    let index = Select::new()
        .with_prompt("操作を選択")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| SpeciesIdError::Prompt(e.to_string()))?;
    Ok(actions[index])
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
