use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chill_api::{
    config::Config,
    routes::{create_router, AppState},
    services::swipes::SwipeLimits,
    store::{MemoryStore, UserStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let store: Arc<dyn UserStore> = match &config.store_seed {
        Some(path) => Arc::new(MemoryStore::from_seed_file(path)?),
        None => Arc::new(MemoryStore::new()),
    };

    let limits = SwipeLimits {
        daily: config.daily_swipe_limit,
    };
    let app = create_router(AppState::new(store, limits));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chill_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
