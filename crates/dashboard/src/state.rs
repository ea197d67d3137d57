//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::ListingCache;
use crate::config::DashboardConfig;
use crate::fixtures::Fixtures;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    pool: PgPool,
    cache: ListingCache,
    fixtures: Fixtures,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Dashboard configuration
    /// * `pool` - `PostgreSQL` connection pool
    /// * `fixtures` - Data loaded by the seed route
    #[must_use]
    pub fn new(config: DashboardConfig, pool: PgPool, fixtures: Fixtures) -> Self {
        let cache = ListingCache::new(config.listing_cache_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                cache,
                fixtures,
            }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the listing cache.
    #[must_use]
    pub fn cache(&self) -> &ListingCache {
        &self.inner.cache
    }

    /// Get a reference to the seed fixtures.
    #[must_use]
    pub fn fixtures(&self) -> &Fixtures {
        &self.inner.fixtures
    }
}
