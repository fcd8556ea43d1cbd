pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod utils;
pub mod validation;

use crate::cache::UserCache;
use crate::config::Config;
use crate::db::DbPool;
use crate::middleware::auth::AuthService;
use crate::utils::AssetUrlHelper;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub redis: redis::Client,
    pub config: Arc<Config>,
    pub asset_helper: AssetUrlHelper,
    pub auth_service: AuthService,
    pub user_cache: UserCache,
}

impl AppState {
    pub fn new(db: DbPool, redis: redis::Client, config: Config) -> Self {
        let asset_helper = AssetUrlHelper::new(&config.assets());
        let auth_service = AuthService::new(config.auth());
        let user_cache = UserCache::new(redis.clone());
        Self {
            db,
            redis,
            config: Arc::new(config),
            asset_helper,
            auth_service,
            user_cache,
        }
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .init();
        }
    }
}
