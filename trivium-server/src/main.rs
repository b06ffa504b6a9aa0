use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use trivium_common::observability::{init_logging, LogConfig, LogFormat};
use trivium_config::{TriviumConfig, TriviumConfigLoader};
use trivium_digest::Composer;
use trivium_sources::{OnThisDayClient, PageFetcher, SearchClient, WikipediaClient};

mod routes;

/// Bar-trivia research aggregator tool server.
#[derive(Parser, Debug)]
#[command(name = "trivium-server", version)]
struct Cli {
    /// Path to the YAML configuration file (skipped when absent).
    #[arg(long, default_value = "trivium.yaml")]
    config: PathBuf,

    /// Override the configured bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins over file, flags win over both)
    let mut cfg: TriviumConfig = TriviumConfigLoader::new()
        .with_file_if_present(&cli.config)
        .load()?;
    if let Some(host) = cli.host {
        cfg.server.host = host;
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }

    let log_path = init_logging(LogConfig {
        app_name: "trivium",
        log_dir: cfg.logging.dir.as_ref().map(PathBuf::from),
        emit_stderr: cfg.logging.stderr,
        format: if cfg.logging.format.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        ..LogConfig::default()
    })?;
    tracing::info!(log_file = %log_path.display(), "logging initialised");

    let composer = build_composer(&cfg)?;
    let app = routes::router(composer);

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "trivium tool server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("trivium tool server stopped");
    Ok(())
}

fn build_composer(cfg: &TriviumConfig) -> Result<Composer> {
    let sources = &cfg.sources;
    Ok(Composer::new(
        SearchClient::new(&sources.search_base, &sources.browser_user_agent)?,
        WikipediaClient::new(&sources.wikipedia_api_base)?,
        OnThisDayClient::new(&sources.wikipedia_rest_base, &sources.feed_user_agent)?,
        PageFetcher::new(&sources.browser_user_agent)?,
    ))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
