// Model exports
pub mod criteria;
pub mod domain;
pub mod navigation;
pub mod requests;
pub mod responses;

pub use criteria::{
    BathroomThreshold, BedroomThreshold, CriteriaError, FilterCriteria, MoreOptions, PetPolicy,
    PriceRange, PropertyTypeFilter, SortKey, ALL_TYPES,
};
pub use domain::{
    BedroomPrice, Coordinates, Listing, ListingCard, SearchHistoryEntry, User, SHORT_LET_TYPE,
};
pub use navigation::{NavigationParams, SearchParams, SearchTarget};
pub use requests::{
    ApplyRequest, CurrentLocationRequest, GeocodeQuery, RecordSearchRequest, SessionQuery,
    SignInRequest, SignUpRequest,
};
pub use responses::{
    ApplyResponse, AuthResponse, ContinueSearchResponse, ErrorResponse, FavoritesResponse,
    GeocodeResponse, HealthResponse, HistoryLink, HistoryResponse, RecordSearchResponse,
    SearchResponse, SessionResponse, ToggleFavoriteResponse,
};
