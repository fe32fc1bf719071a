use serde::{Deserialize, Serialize};

/// Property category that the short-term-lease filter restricts to
pub const SHORT_LET_TYPE: &str = "Shortlet";

/// Rental listing from the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub title: String,
    pub address: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub offer: Option<String>,
    #[serde(default)]
    pub prices: Vec<BedroomPrice>,
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Listing {
    /// Identifier as a number, used for "newest" ordering
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }

    /// Lowercased `title description amenities...` blob scanned by the
    /// keyword and pet filters
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description.as_deref().unwrap_or(""),
            self.amenities.join(" ")
        )
        .to_lowercase()
    }

    pub fn is_short_let(&self) -> bool {
        self.property_type.eq_ignore_ascii_case(SHORT_LET_TYPE)
    }
}

/// Per-bedroom-count price row shown on listing cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BedroomPrice {
    pub beds: u32,
    pub price: f64,
}

/// Longitude/latitude pair as returned by the geocoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A remembered search shown on the landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinates>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl SearchHistoryEntry {
    pub fn new(
        location: impl Into<String>,
        coords: Option<Coordinates>,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let timestamp = at.timestamp_millis();
        Self {
            id: timestamp.to_string(),
            location: location.into(),
            coords,
            timestamp,
        }
    }
}

/// Signed-in account as exposed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
}

impl User {
    pub fn avatar_url(email: &str) -> String {
        format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            urlencoding::encode(email)
        )
    }
}

/// Compact listing summary used by the landing-page carousel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCard {
    pub id: String,
    pub image: Option<String>,
    pub price: f64,
    pub beds: u32,
    pub baths: f64,
    pub status: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: String,
}

impl From<&Listing> for ListingCard {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            image: listing.images.first().cloned(),
            price: listing.price,
            beds: listing.bedrooms,
            baths: listing.bathrooms,
            status: "Active".to_string(),
            address: listing.address.clone(),
            badge: listing.offer.clone(),
            location: listing.location.clone(),
            property_type: listing.property_type.clone(),
        }
    }
}
