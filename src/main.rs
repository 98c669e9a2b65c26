//! Cart Service entry point
//!
//! Loads configuration, connects to Redis, wires the cart handlers over their
//! adapters, and serves the HTTP API until Ctrl+C or SIGTERM.

use std::sync::Arc;

use cart_service::adapters::auth::JwtSessionValidator;
use cart_service::adapters::cart_store::RedisCartStore;
use cart_service::adapters::catalog::HttpProductCatalog;
use cart_service::adapters::http::{build_router, CartHandlers};
use cart_service::adapters::inventory::HttpInventoryService;
use cart_service::config::AppConfig;
use cart_service::ports::{CartStore, InventoryService, ProductCatalog, SessionValidator};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        "Starting Cart Service v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Cart store
    let client = redis::Client::open(config.redis.url.as_str())?;
    let conn = client.get_multiplexed_tokio_connection().await?;
    let store: Arc<dyn CartStore> = Arc::new(RedisCartStore::new(conn, config.redis.timeout()));
    tracing::info!("Connected to Redis");

    // Downstream services
    let catalog: Arc<dyn ProductCatalog> = Arc::new(HttpProductCatalog::new(
        config.services.product_service_url.clone(),
        config.services.timeout(),
    )?);
    let inventory: Arc<dyn InventoryService> = Arc::new(HttpInventoryService::new(
        config.services.inventory_service_url.clone(),
        config.services.timeout(),
    )?);

    let validator: Arc<dyn SessionValidator> =
        Arc::new(JwtSessionValidator::new(&config.auth.jwt_secret));

    let handlers = CartHandlers::new(store, catalog, inventory, config.cart.to_policy());
    let app = build_router(handlers, validator, &config.server);

    let bind_address = config.server.socket_addr();
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Cart Service listening on http://{bind_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Cart Service stopped");
    Ok(())
}

/// Pretty output in development, JSON elsewhere. `RUST_LOG` overrides the
/// configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
