//! Texnouz Rental Service
//!
//! Vehicle rental backend: fleet, bookings, returns.
//! Reads configuration from TOML file (~/.config/texnouz-rental/config.toml).

use tracing::{error, info};

use texnouz_rental::config::{default_config_path, AppConfig};
use texnouz_rental::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("RENTAL_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let (app_cfg, load_note) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, Ok(config_path.display().to_string())),
        Err(e) => (AppConfig::default(), Err(e)),
    };

    init_tracing(&app_cfg);

    match load_note {
        Ok(path) => info!("Configuration loaded from {}", path),
        Err(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    // ── Start the server ───────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config: app_cfg,
        auto_migrate: true,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    Ok(())
}
