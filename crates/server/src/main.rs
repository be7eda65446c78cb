//! snippety server entry point.
//!
//! Loads configuration, opens the snippet store, builds the template cache
//! and serves HTTP until interrupted. Any startup failure is logged and the
//! process exits non-zero without serving.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use snippety_core::{AppConfig, SnippetStore, TemplateCache};
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod error;
mod handlers;

use cli::Cli;

fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(config: AppConfig) -> Result<()> {
    let store = SnippetStore::open(&config.db_path)
        .await
        .with_context(|| format!("opening database {}", config.db_path.display()))?;

    let templates = TemplateCache::new(config.html_dir()).context("building template cache")?;
    tracing::info!(pages = templates.len(), "template cache ready");

    let state = app::AppState::new(store, templates);
    let router = app::router(state, &config.static_dir());

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    tracing::info!(addr = %bind_addr, "starting server");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info", cli.json_logs);
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_level, cli.json_logs);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "server exited");
            ExitCode::FAILURE
        }
    }
}
