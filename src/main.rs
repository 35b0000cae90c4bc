use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinescope_api::{
    config::Config,
    db::{self, Cache},
    engine::{Lookups, RandomGreeting, RankerWeights, Recommender},
    routes::create_router,
    state::AppState,
    store::PgRecordStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinescope_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_url).await?;
    let store = Arc::new(PgRecordStore::new(pool));

    let cache = match db::create_redis_client(&config.redis_url) {
        Ok(client) => Some(Cache::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "Redis unavailable, running without response cache");
            None
        }
    };

    let weights = RankerWeights {
        collab_only_score: config.collab_only_score,
        overlap_boost: config.overlap_boost,
    };
    let recommender = Arc::new(Recommender::new(
        store,
        Arc::new(Lookups::new()),
        weights,
        Arc::new(RandomGreeting),
    ));

    let state = AppState::new(recommender, cache);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "CineScope API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
