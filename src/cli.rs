use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "species-id")]
#[command(about = "画像から種を同定し、結果をPDFで保存するクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話モード（スプラッシュ → 予測画面）
    Session {
        /// スプラッシュを省略
        #[arg(long)]
        no_splash: bool,

        /// PDFの出力先ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 画像1枚を送信して結果を表示
    Identify {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 結果をPDFで保存
        #[arg(long)]
        pdf: bool,

        /// 画面をHTMLで保存
        #[arg(long)]
        html: Option<PathBuf>,

        /// PDFの出力先（ディレクトリまたはファイル）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// Classification Service のURLを設定
        #[arg(long)]
        set_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
