use clap::Parser;
use species_id::{cli, config, error, export, logging, picker, service, session, splash};
use species_id::{FlowSettings, ResultFlowController, SubmitOutcome};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SpeciesIdError};
use export::pdf::PdfRenderer;
use service::HttpClassifier;
use std::path::PathBuf;
use std::time::Duration;

const DOCUMENT_TITLE: &str = "Species Identification";

fn build_services(config: &Config) -> Result<(HttpClassifier, PdfRenderer)> {
    let classifier = HttpClassifier::new(
        &config.service_url(),
        config.timeout_seconds.map(Duration::from_secs),
    )?;
    let renderer = PdfRenderer::new(DOCUMENT_TITLE, config.panel_width_pt).with_fetcher(classifier.clone());
    Ok((classifier, renderer))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Session { no_splash, output } => {
            let (classifier, renderer) = build_services(&config)?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));

            if !no_splash {
                splash::show_splash(config.splash_delay()).await;
            }

            println!("🔍 species-id - 種同定 ({})\n", classifier.endpoint());

            let mut controller = ResultFlowController::new(
                picker::PromptPicker,
                classifier,
                renderer,
                FlowSettings::from_config(&config, output_dir),
            );
            session::run_session(&mut controller).await?;
        }

        Commands::Identify { image, pdf, html, output } => {
            let (classifier, renderer) = build_services(&config)?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));

            println!("🔍 species-id - 種同定\n");

            let mut controller = ResultFlowController::new(
                picker::PathPicker::new(image),
                classifier,
                renderer,
                FlowSettings::from_config(&config, output_dir),
            );

            // 1. 画像選択
            println!("[1/2] 画像を読み込み中...");
            controller.select_image()?;
            if let Some(selected) = controller.selected() {
                println!("✔ {} ({} bytes)\n", selected.file_name, selected.bytes.len());
            }

            // 2. 送信
            println!("[2/2] 同定中...");
            let outcome = controller.submit().await?;
            if outcome == SubmitOutcome::Unreachable {
                return Err(SpeciesIdError::ServiceUnavailable);
            }
            println!("{}\n", species_id_common::render_text(controller.view()));

            if let Some(html_path) = html {
                export::html::write_html(controller.view(), controller.urls(), &config.service_url(), &html_path)?;
                println!("✔ HTML出力: {}", html_path.display());
            }

            if pdf {
                if outcome == SubmitOutcome::Identified {
                    let path = controller.export_result().await?;
                    println!("✔ PDF出力: {}", path.display());
                } else {
                    println!("- 同定できなかったためPDFは出力しません");
                }
            }
        }

        Commands::Config { set_url, show } => {
            let mut config = config;

            if let Some(url) = set_url {
                config.set_service_url(url)?;
                println!("✔ 接続先を設定しました");
            }

            if show {
                println!("設定:");
                println!("  接続先: {}", config.service_url());
                println!("  画像フィールド: {}", config.image_field);
                println!("  PDFファイル名: {}", config.pdf_file_name);
                println!("  スプラッシュ: {}ms", config.splash_delay_ms);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
            }
        }
    }

    Ok(())
}
