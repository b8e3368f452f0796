mod cli;
mod db;
mod telemetry;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock};
use std::sync::Arc;
use ui::{App, UiApp, build_app_context};

use crate::cli::Settings;

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let matches = cli::new().get_matches();
    let settings = Settings::from_matches(&matches);

    telemetry::init(telemetry::get_verbosity_level(settings.verbosity))?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    let db_url = db::normalize_sqlite_url(&settings.db_url)?;
    db::prepare_sqlite_file(&db_url)?;
    tracing::info!(%db_url, api = %settings.api_base_url, "starting");

    let services = AppServices::new_sqlite(&db_url, &settings.api_base_url, Clock::system()).await?;
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("AlphaTest")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
