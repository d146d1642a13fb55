use anyhow::Result;
use scratchinfo::{api, config::Config, server, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    std::fs::create_dir_all(&config.log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "scratchinfo.log");
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    let scratch = api::ScratchApi::new(&config.scratch_api_base_url, config.upstream_timeout)?;
    info!(
        base_url = %config.scratch_api_base_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "Scratch API client ready"
    );

    let state = Arc::new(AppState { scratch });

    server::start_server(state, config.port, &config.base_path).await
}
