// Route exports
pub mod auth;
pub mod error;
pub mod favorites;
pub mod health;
pub mod history;
pub mod listings;

use actix_web::web;
use std::sync::Arc;

use crate::core::{LookupSequencer, QueryEngine};
use crate::services::{
    AccountService, CacheManager, GeocodingClient, ListingCatalog, PostgresClient, SessionStore,
};

pub use error::ApiError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: ListingCatalog,
    pub engine: QueryEngine,
    pub cache: Arc<CacheManager>,
    pub sessions: SessionStore,
    pub postgres: Arc<PostgresClient>,
    pub accounts: Arc<AccountService>,
    pub geocoder: Arc<GeocodingClient>,
    pub sequencer: Arc<LookupSequencer>,
}

impl AppState {
    pub fn new(
        catalog: ListingCatalog,
        engine: QueryEngine,
        cache: Arc<CacheManager>,
        postgres: Arc<PostgresClient>,
        geocoder: Arc<GeocodingClient>,
        history_capacity: usize,
    ) -> Self {
        Self {
            catalog,
            engine,
            sessions: SessionStore::new(cache.clone(), history_capacity),
            accounts: Arc::new(AccountService::new(postgres.clone(), cache.clone())),
            cache,
            postgres,
            geocoder,
            sequencer: Arc::new(LookupSequencer::new()),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(listings::configure)
            .configure(history::configure)
            .configure(favorites::configure)
            .configure(auth::configure),
    );
}
