//! Rental Search - listing search and session service for the rentals web app
//!
//! This library provides the listing query engine behind the rentals search
//! page. It implements a multi-stage filtering pipeline over an in-memory
//! catalog, plus the landing-page feed, search history and favorites.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{QueryEngine, SearchHistory};
pub use crate::models::{FilterCriteria, Listing, NavigationParams, SearchParams};
pub use crate::services::ListingCatalog;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let catalog = ListingCatalog::bundled().unwrap();
        let results = QueryEngine::default().query(catalog.all(), "", &FilterCriteria::default());
        assert_eq!(results.len(), catalog.len());
    }
}
