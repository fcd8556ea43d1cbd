pub mod enums;
pub mod models;
pub mod repositories;

use crate::config::DatabaseConfig;
use diesel::PgConnection;
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};
use std::time::Duration;

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;

/// Builds the connection pool, failing fast when the database is unreachable.
pub fn build_pool(config: &DatabaseConfig) -> Result<DbPool, r2d2::PoolError> {
    r2d2::Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(DbConnectionManager::<PgConnection>::new(&config.url))
}

/// Builds the pool without opening any connection. Connections are created
/// lazily on first checkout.
pub fn build_lazy_pool(config: &DatabaseConfig) -> DbPool {
    r2d2::Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(0))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build_unchecked(DbConnectionManager::<PgConnection>::new(&config.url))
}
