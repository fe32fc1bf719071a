use crate::models::{
    BathroomThreshold, BedroomThreshold, Listing, PetPolicy, PriceRange, PropertyTypeFilter,
};

/// Normalized location search text
///
/// `full` is the lowercased, trimmed input; `city` is the part before the
/// first comma ("durham" for "Durham, NC").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub full: String,
    pub city: String,
}

impl LocationQuery {
    /// Returns `None` for blank input, which disables the location stage
    pub fn parse(raw: &str) -> Option<Self> {
        let full = raw.trim().to_lowercase();
        if full.is_empty() {
            return None;
        }
        let city = full.split(',').next().unwrap_or_default().trim().to_string();
        Some(Self { full, city })
    }
}

/// Stage 1: property type
#[inline]
pub fn matches_property_type(listing: &Listing, filter: &PropertyTypeFilter) -> bool {
    filter.matches(&listing.property_type)
}

/// Stage 2: plain substring match of either token against location or address
#[inline]
pub fn matches_location(listing: &Listing, query: &LocationQuery) -> bool {
    let location = listing.location.to_lowercase();
    let address = listing.address.to_lowercase();

    location.contains(&query.city)
        || location.contains(&query.full)
        || address.contains(&query.city)
        || address.contains(&query.full)
}

/// Stage 3: inclusive price bounds
#[inline]
pub fn matches_price(listing: &Listing, range: &PriceRange) -> bool {
    range.contains(listing.price)
}

/// Stage 4: bedrooms at or above the threshold
#[inline]
pub fn matches_bedrooms(listing: &Listing, threshold: BedroomThreshold) -> bool {
    threshold.minimum().map_or(true, |min| listing.bedrooms >= min)
}

/// Stage 5: bathrooms at or above the threshold
#[inline]
pub fn matches_bathrooms(listing: &Listing, threshold: BathroomThreshold) -> bool {
    threshold.minimum().map_or(true, |min| listing.bathrooms >= min)
}

/// Stage 6: keyword anywhere in title, description or amenities
pub fn matches_keywords(listing: &Listing, keywords: &str) -> bool {
    let needle = keywords.to_lowercase();
    listing.searchable_text().contains(&needle)
}

/// Stage 7: at least one selected pet tag is satisfied
///
/// Substring co-occurrence over free text, not a structured field. "small"
/// and "dog" anywhere in the text is enough for `small-dogs`.
pub fn matches_pets(listing: &Listing, pets: &[PetPolicy]) -> bool {
    let text = listing.searchable_text();
    pets.iter().any(|pet| pet.matches(&text))
}

/// Stage 8: short-let category only
#[inline]
pub fn matches_short_term_lease(listing: &Listing) -> bool {
    listing.is_short_let()
}
