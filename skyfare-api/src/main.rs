use skyfare_api::{app, AppState};
use skyfare_catalog::{InMemoryCatalog, PricingConfig, PricingEngine};
use skyfare_core::repository::KeyValueStore;
use skyfare_store::app_config::{Config, SessionBackend};
use skyfare_store::{MemoryStore, RedisClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Skyfare API on port {}", config.server.port);

    let catalog = InMemoryCatalog::from_json_file(&config.catalog.seed_path)?;
    tracing::info!("Loaded {} flight records from {}", catalog.len(), config.catalog.seed_path);

    let session: Arc<dyn KeyValueStore> = match config.session.backend {
        SessionBackend::Memory => Arc::new(MemoryStore::new()),
        SessionBackend::Redis => {
            let url = config
                .session
                .redis_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("session.redis_url is required for the redis backend"))?;
            Arc::new(RedisClient::new(url, config.session.ttl_seconds)?)
        }
    };

    let pricing = PricingEngine::new(PricingConfig {
        saver_multiplier: config.bundle_rules.saver_multiplier,
        flex_multiplier: config.bundle_rules.flex_multiplier,
        commission_inr: config.bundle_rules.commission_inr,
    });

    let state = AppState::new(Arc::new(catalog), pricing, session, Arc::new(MemoryStore::new()));
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
