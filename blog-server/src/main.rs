use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::blog_service::BlogService;
use data::post_store::PostStore;
use data::stores::memory::InMemoryPostStore;
use data::stores::postgres::PostgresPostStore;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::{Settings, StoreBackend};
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level, settings.log_format)?;

    let store = build_store(&settings.store).await?;
    let blog_service = Arc::new(BlogService::new(store));
    let state = AppState::new(blog_service);

    server::run_http(&settings, state).await
}

async fn build_store(backend: &StoreBackend) -> Result<Arc<dyn PostStore>> {
    match backend {
        StoreBackend::Memory => {
            warn!("using in-memory post store, posts are lost on restart");
            Ok(Arc::new(InMemoryPostStore::new()))
        }
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = create_pool(database_url, *max_connections).await?;
            run_migrations(&pool).await?;
            info!("using postgres post store");
            Ok(Arc::new(PostgresPostStore::new(pool)))
        }
    }
}
