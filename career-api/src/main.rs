//! Career Recommendation API - main entry point
//!
//! Serves career predictions through the Local → Remote → Fallback tiers and
//! enriches them with supplementary content.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use career_api::config::{CliOverrides, ServiceConfig};
use career_api::content::{ContentService, HttpContentService};
use career_api::inference::InferenceContext;
use career_api::{build_router, AppState};
use career_common::config::{load_toml_config, resolve_config_path};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for career-api
#[derive(Parser, Debug)]
#[command(name = "career-api")]
#[command(about = "Career recommendation service with degradation-aware prediction")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "CAREER_PORT")]
    port: Option<u16>,

    /// Bootstrap TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with scaler.json, model.json and label_encoder.json
    #[arg(long)]
    model_dir: Option<String>,

    /// Remote inference endpoint
    #[arg(long)]
    remote_url: Option<String>,

    /// Generative content service base URL
    #[arg(long)]
    content_url: Option<String>,

    /// Bearer key for the content service
    #[arg(long)]
    content_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let toml_config = load_toml_config(config_path.as_deref());

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "career_api={level},career_common={level},tower_http={level}",
                    level = toml_config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting career-api v{} (git {}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) => info!("Config file: {}", path.display()),
        None => warn!("No config file location available, using defaults"),
    }

    let cli = CliOverrides {
        port: args.port,
        model_dir: args.model_dir,
        remote_url: args.remote_url,
        content_url: args.content_url,
        content_api_key: args.content_api_key,
    };
    let config = ServiceConfig::resolve(&cli, &toml_config);

    let context = InferenceContext::initialize(&config.inference, config.content.base_url.is_some())
        .context("Failed to initialize inference tiers")?;
    let snapshot = context.degradation.snapshot();
    info!(
        local_model_loaded = snapshot.local_model_loaded,
        remote = ?snapshot.remote_inference,
        content = ?snapshot.content_service,
        "Inference tiers ready"
    );

    let content_timeout = config.content.timeout;
    let content: Arc<dyn ContentService> = Arc::new(
        HttpContentService::new(config.content.clone(), Arc::clone(&context.degradation))
            .context("Failed to create content service client")?,
    );

    let app = build_router(AppState::new(&context, content, content_timeout));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM; in-flight requests drain before exit
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
