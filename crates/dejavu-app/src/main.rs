use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dejavu_api::HttpBackend;
use dejavu_config::Config;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod io;
mod state;
mod ui;


use self::controller::AppController;
use self::state::AppState;

/// Terminal client for the Dejavu screenshot text-search service.
#[derive(Parser)]
#[command(name = "dejavu-app")]
struct Args {
    /// Backend base URL; overrides DEJAVU_API_BASE_URL.
    #[arg(long)]
    api_base: Option<String>,

    /// Location to open at startup, e.g. "/search?text=error".
    #[arg(long, default_value = "/")]
    open: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::new();
    if let Some(api_base) = args.api_base {
        config.network.api_base_url = api_base.trim_end_matches('/').to_string();
    }

    let backend = Arc::new(HttpBackend::new(
        config.network.api_base_url.clone(),
        Duration::from_millis(config.network.request_timeout_ms),
    )?);

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(backend, args.open);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested");
            controller.shutdown();
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
            controller.shutdown();
        }
    }

    Ok(())
}
