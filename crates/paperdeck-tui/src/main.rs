use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use paperdeck_core::{tracing_setup, CoreConfig, CoreRuntime};
use tokio::sync::mpsc::unbounded_channel;

use paperdeck_tui::runtime::run_app;
use paperdeck_tui::terminal;
use paperdeck_tui::ui::App;

#[derive(Parser)]
#[command(
    name = "paperdeck",
    about = "Terminal client for the paperdeck research backend"
)]
struct Args {
    /// Backend base URL (overrides PAPERDECK_BACKEND_URL).
    #[arg(long)]
    backend: Option<String>,

    /// Append logs to this file (overrides PAPERDECK_LOG_FILE).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_setup::init_tracing(args.log_file.as_deref())?;

    let config = match args.backend {
        Some(url) => CoreConfig::new(url),
        None => CoreConfig::from_env(),
    };
    tracing::info!(backend = %config.backend_url, "starting paperdeck");

    let (core, mut core_events) = CoreRuntime::new(config);
    let (audio_tx, mut audio_results) = unbounded_channel();
    let mut app = App::new(core, audio_tx);

    let mut terminal = terminal::init()?;
    let result = run_app(&mut terminal, &mut app, &mut core_events, &mut audio_results).await;
    terminal::restore()?;
    result
}
