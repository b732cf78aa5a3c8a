//! 起動スプラッシュ
//!
//! 一定時間バナーを表示した後、予測画面へ遷移する。

use std::time::Duration;

/// 遷移先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SpeciesPrediction,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::SpeciesPrediction => "/speciesPrediction",
        }
    }
}

const BANNER: &str = r"
   ____                  _              ___ ____
  / ___| _ __   ___  ___(_) ___  ___   |_ _|  _ \
  \___ \| '_ \ / _ \/ __| |/ _ \/ __|   | || | | |
   ___) | |_) |  __/ (__| |  __/\__ \   | || |_| |
  |____/| .__/ \___|\___|_|\___||___/  |___|____/
        |_|
";

/// バナーを表示して待機し、次の画面を返す
pub async fn show_splash(delay: Duration) -> Route {
    println!("{}", BANNER);
    tokio::time::sleep(delay).await;

    let route = Route::SpeciesPrediction;
    tracing::debug!(route = route.path(), "splash finished");
    route
}
