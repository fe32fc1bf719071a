// Service exports
pub mod accounts;
pub mod cache;
pub mod catalog;
pub mod geocoding;
pub mod postgres;
pub mod session_store;

pub use accounts::{password_digest, AccountService, AuthError, SessionContext};
pub use cache::{CacheError, CacheKey, CacheManager};
pub use catalog::{CatalogError, ListingCatalog};
pub use geocoding::{GeocodeError, GeocodingClient, Place, ResolvedLocation};
pub use postgres::{AccountRecord, PostgresClient, PostgresError};
pub use session_store::SessionStore;
