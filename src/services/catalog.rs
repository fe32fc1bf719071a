use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::models::Listing;

const BUNDLED_LISTINGS: &str = include_str!("../../data/sample_listings.json");

/// Errors that can occur while loading the listing catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate listing id: {0}")]
    DuplicateId(String),

    #[error("Invalid listing {id}: {reason}")]
    InvalidListing { id: String, reason: String },
}

/// Immutable, in-memory listing catalog
///
/// Cloning is cheap; every clone shares the same list.
#[derive(Debug, Clone)]
pub struct ListingCatalog {
    listings: Arc<Vec<Listing>>,
}

impl ListingCatalog {
    pub fn new(listings: Vec<Listing>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(listings.len());
        for listing in &listings {
            if !seen.insert(listing.id.as_str()) {
                return Err(CatalogError::DuplicateId(listing.id.clone()));
            }
            validate(listing)?;
        }

        Ok(Self {
            listings: Arc::new(listings),
        })
    }

    /// Catalog compiled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_LISTINGS)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` when configured, otherwise the bundled catalog
    pub fn from_settings(path: Option<&str>) -> Result<Self, CatalogError> {
        let catalog = match path.filter(|p| !p.trim().is_empty()) {
            Some(path) => {
                tracing::info!("Loading listings from {}", path);
                Self::from_path(path)?
            }
            None => Self::bundled()?,
        };

        tracing::info!("Listing catalog ready with {} listings", catalog.len());
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

fn validate(listing: &Listing) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidListing {
        id: listing.id.clone(),
        reason: reason.to_string(),
    };

    if listing.id.trim().is_empty() {
        return Err(invalid("empty id"));
    }
    if !listing.price.is_finite() || listing.price < 0.0 {
        return Err(invalid("price must be a non-negative number"));
    }
    if !listing.bathrooms.is_finite() || listing.bathrooms < 0.0 {
        return Err(invalid("bathrooms must be a non-negative number"));
    }
    if listing.prices.iter().any(|p| !p.price.is_finite() || p.price < 0.0) {
        return Err(invalid("bedroom prices must be non-negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &str = r#"[
        {"id": "1", "title": "A", "address": "1 Main St", "price": 1000,
         "bedrooms": 1, "bathrooms": 1, "location": "Durham", "type": "Home"},
        {"id": "2", "title": "B", "address": "2 Main St", "price": 2000,
         "bedrooms": 2, "bathrooms": 2, "location": "Raleigh", "type": "Condo"}
    ]"#;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = ListingCatalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.all().iter().any(|l| l.is_short_let()));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = ListingCatalog::from_json(TWO).unwrap();
        assert_eq!(catalog.get("2").map(|l| l.title.as_str()), Some("B"));
        assert!(catalog.get("3").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = TWO.replace("\"id\": \"2\"", "\"id\": \"1\"");
        assert!(matches!(
            ListingCatalog::from_json(&json),
            Err(CatalogError::DuplicateId(id)) if id == "1"
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = TWO.replace("\"price\": 2000", "\"price\": -5");
        assert!(matches!(
            ListingCatalog::from_json(&json),
            Err(CatalogError::InvalidListing { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            ListingCatalog::from_path("/definitely/not/here.json"),
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn test_blank_path_uses_bundled() {
        let catalog = ListingCatalog::from_settings(Some("  ")).unwrap();
        assert_eq!(catalog.len(), ListingCatalog::bundled().unwrap().len());
    }
}
