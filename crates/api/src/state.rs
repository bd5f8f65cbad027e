use std::sync::Arc;

use parish_core::store::SectionStore;
use parish_db::PgPageStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: parish_db::DbPool,
    /// Section-level content store backed by the pool.
    pub store: SectionStore<PgPageStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
