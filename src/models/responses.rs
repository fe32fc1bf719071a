use serde::{Deserialize, Serialize};

use crate::core::map::MapState;
use crate::models::domain::{Coordinates, Listing, ListingCard, SearchHistoryEntry, User};

/// Response for the listing search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub listings: Vec<Listing>,
    pub total_results: usize,
    pub location: String,
    pub no_matches: bool,
    pub message: String,
    pub sort: String,
    pub map: MapState,
}

/// Landing-page "continue searching" feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueSearchResponse {
    pub heading: String,
    pub properties: Vec<ListingCard>,
    pub no_exact_match: bool,
    pub last_search: Option<HistoryLink>,
}

/// History entry together with the results link it leads to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryLink {
    #[serde(flatten)]
    pub entry: SearchHistoryEntry,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub session_id: String,
    pub entries: Vec<HistoryLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSearchResponse {
    #[serde(flatten)]
    pub link: HistoryLink,
    /// A newer lookup for this session finished first; this one was not recorded
    pub stale: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    pub session_id: String,
    pub favorites: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteResponse {
    pub listing_id: String,
    pub favorited: bool,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub location: String,
    pub coords: Option<Coordinates>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResponse {
    pub success: bool,
    pub request_id: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub listings: usize,
    pub cache: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
