use anyhow::{Context, Result};
use astroidy_common::logging;
use astroidy_proxy::config::{self, ProxyConfig};
use astroidy_proxy::{AppState, router};
use tokio::net::TcpListener;
use tokio::signal;

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let config = ProxyConfig::load(CONFIG_PATH)?;

    let _logging_guard = logging::init_logging("logs", "astroidy-proxy", &config.log_level, true)
        .context("Failed to initialize logging")?;

    tracing::info!("Astroidy proxy starting...");
    tracing::info!("Loaded configuration: {:?}", config);

    let api_key = config::api_key_from_env();
    if api_key.is_none() {
        tracing::warn!(
            "{} not set, upstream requests will carry an empty api_key",
            config::API_KEY_ENV
        );
    }

    let state = AppState::new(&config, api_key)?;
    let app = router(state, config.enable_cors);

    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Feed proxy listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Astroidy proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
