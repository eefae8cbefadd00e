//! Backend entry-point: loads settings, connects storage and serves the API.

mod server;

use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| {
            error!(error = %e, "failed to load settings");
            std::io::Error::other(e.to_string())
        })?;
    let config = ServerConfig::try_from(settings).map_err(|e| {
        error!(error = %e, "invalid settings");
        std::io::Error::other(e)
    })?;

    create_server(config).await?.await
}
