mod config;
mod errors;
mod models;
mod quote;
mod server;
mod state;

use crate::errors::PricerError;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("bs_pricer starting");

    // Load config
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        normal_cdf = %cfg.normal_backend,
        max_expiry_years = cfg.max_expiry_years,
        "configuration loaded"
    );

    let addr = cfg.bind_addr();
    let app = server::build_router(AppState::new(cfg));

    let listener = match tokio::net::TcpListener::bind(&addr).await.map_err(PricerError::from) {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, "bind error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("server listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
