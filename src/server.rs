//! Reusable rental service runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, REST API, background tasks, metrics, and
//! graceful shutdown. The CLI binary and integration tests both use this
//! to start/stop the service without duplicating bootstrap code.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{start_pending_expiry_task, BookingService, VehicleService};
use crate::config::AppConfig;
use crate::domain::{PricingPolicy, RepositoryProvider};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{create_api_router, init_database, DatabaseConfig};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the rental service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running rental service.
///
/// Provides access to the repository provider and services, plus methods
/// for graceful shutdown.
///
/// # Examples
///
/// ```rust,no_run
/// use texnouz_rental::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// Fleet management service.
    pub vehicles: Arc<VehicleService>,
    /// Booking lifecycle service.
    pub bookings: Arc<BookingService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the REST API is listening on.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the rental service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations
    /// 3. Wire up repositories and services
    /// 4. Start the REST API server (with Swagger UI)
    /// 5. Start the pending-expiry task when `[holds]` enables it
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting Texnouz Rental Service...");
        crate::api::handlers::health::mark_started();

        // ── Prometheus metrics recorder ────────────────────────
        // The global metrics recorder can only be installed once per process.
        // On restart (stop + start within the same process) we must reuse it.
        use std::sync::OnceLock;
        static PROM_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
            OnceLock::new();

        let prometheus_handle = PROM_HANDLE
            .get_or_init(|| {
                let h = metrics_exporter_prometheus::PrometheusBuilder::new()
                    .install_recorder()
                    .expect("Failed to install Prometheus metrics recorder");
                info!("📊 Prometheus metrics recorder installed");
                h
            })
            .clone();

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig {
            url: app_cfg.database.connection_url(),
        };
        info!("Database: {}", db_config.url);

        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let pricing = PricingPolicy {
            overage_rate: app_cfg.pricing.overage_rate,
            currency: app_cfg.pricing.currency.clone(),
        };
        let vehicles = Arc::new(VehicleService::new(repos.clone()));
        let bookings = Arc::new(BookingService::new(repos.clone(), pricing));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── Background tasks ───────────────────────────────────
        if app_cfg.holds.expire_pending {
            start_pending_expiry_task(
                bookings.clone(),
                shutdown_signal.clone(),
                app_cfg.holds.pending_ttl_hours,
                app_cfg.holds.check_interval_secs,
            );
        }

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(vehicles.clone(), bookings.clone(), prometheus_handle);

        let api_port = app_cfg.server.port;
        let api_addr = app_cfg.api_address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(
            listener,
            api_router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        info!("🚀 Rental service started.");

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            vehicles,
            bookings,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    ///
    /// Sends the shutdown signal to all server components. Call [`Self::wait`]
    /// to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to drain.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        match tokio::time::timeout(self.shutdown.drain_timeout(), self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!(
                "REST API server did not drain within {:?}, abandoning it",
                self.shutdown.drain_timeout()
            ),
        }

        // Close database connection
        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 Texnouz Rental Service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down rental service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
