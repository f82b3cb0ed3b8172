//! HTTP server for the Nurse Pay Engine.
//!
//! Reads `NURSE_PAY_CONFIG_DIR` (default `./config/us_2023`) and
//! `NURSE_PAY_BIND_ADDR` (default `127.0.0.1:3000`). Log level comes from
//! `RUST_LOG`.

use nurse_pay_engine::api::{AppState, create_router};
use nurse_pay_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_CONFIG_DIR: &str = "./config/us_2023";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set up logging: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config_dir =
        std::env::var("NURSE_PAY_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        std::env::var("NURSE_PAY_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        year = config.metadata().year,
        "Loaded tax tables"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(bind_addr = %bind_addr, "Nurse Pay Engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
