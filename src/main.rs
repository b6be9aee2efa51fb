use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mealplan_api::{
    config::{Config, StoreBackend},
    db, routes, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let store = db::connect(&config).await?;

    if config.seed_demo {
        if config.store_backend == StoreBackend::Memory {
            let today = chrono::Local::now().date_naive();
            let summary = db::demo::seed(store.as_ref(), today, config.week_start).await?;
            info!(
                "Seeded demo data: {} recipes, {} menus, {} calendar entries",
                summary.recipes, summary.menus, summary.calendar_entries
            );
        } else {
            info!("SEED_DEMO ignored for postgres; run the seed-demo binary instead");
        }
    }

    let state = AppState {
        store,
        config: config.clone(),
    };

    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("mealplan API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
