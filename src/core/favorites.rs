use serde::{Deserialize, Serialize};

/// Listing ids a session has favorited, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<String>);

impl Favorites {
    pub fn contains(&self, listing_id: &str) -> bool {
        self.0.iter().any(|id| id == listing_id)
    }

    /// Add if absent, remove if present; returns whether it is now a favorite
    pub fn toggle(&mut self, listing_id: &str) -> bool {
        if self.contains(listing_id) {
            self.0.retain(|id| id != listing_id);
            false
        } else {
            self.0.push(listing_id.to_string());
            true
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
