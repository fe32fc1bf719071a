use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::viewport_for;
use crate::models::{
    ApplyRequest, ApplyResponse, GeocodeQuery, GeocodeResponse, Listing, SearchParams,
    SearchResponse,
};
use crate::routes::{ApiError, AppState};

/// Configure listing and lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // `search` is registered ahead of `{id}` so it is not read as an id
        .route("/listings/search", web::get().to(search_listings))
        .route("/listings/{id}", web::get().to(get_listing))
        .route("/listings/{id}/apply", web::post().to(apply_for_listing))
        .route("/geocode", web::get().to(geocode));
}

/// Search listings
///
/// GET /api/v1/listings/search?location=Durham&priceMin=1000&priceMax=2000&beds=2%2B
///
/// Unknown labels and bad price ranges are rejected before the engine runs.
/// Zero matches is a normal 200 with `noMatches: true`.
async fn search_listings(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse, ApiError> {
    params.validate()?;
    let target = params.to_target()?;
    target.criteria.validate()?;

    let outcome = state
        .engine
        .search(state.catalog.all(), &target.location, &target.criteria);

    let total_results = outcome.listings.len();
    let message = results_message(&target.location, total_results);

    tracing::info!(
        "Search '{}' returned {} listings",
        target.location,
        total_results
    );

    Ok(HttpResponse::Ok().json(SearchResponse {
        listings: outcome.listings.into_iter().cloned().collect(),
        total_results,
        no_matches: outcome.no_matches,
        message,
        sort: target.criteria.sort_key.as_str().to_string(),
        map: viewport_for(target.coords, &target.location),
        location: target.location,
    }))
}

fn results_message(location: &str, count: usize) -> String {
    let location = location.trim();
    if count == 0 {
        return format!("No listings found for \"{}\"", location);
    }
    if location.is_empty() {
        return format!("{} rentals available", count);
    }
    let plural = if count == 1 { "" } else { "s" };
    format!("{} rental{} found in {}", count, plural, location)
}

fn find_listing<'a>(state: &'a AppState, id: &str) -> Result<&'a Listing, ApiError> {
    state
        .catalog
        .get(id)
        .ok_or_else(|| ApiError::NotFound(format!("Listing {} not found", id)))
}

/// GET /api/v1/listings/{id}
async fn get_listing(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let listing = find_listing(&state, &path)?;
    Ok(HttpResponse::Ok().json(listing))
}

/// Request to apply
///
/// POST /api/v1/listings/{id}/apply
///
/// The form is validated and logged; nothing is delivered.
async fn apply_for_listing(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ApplyRequest>,
) -> Result<HttpResponse, ApiError> {
    let listing = find_listing(&state, &path)?;
    req.validate()?;

    let request_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        "Application {} for listing {} ({}) from {}",
        request_id,
        listing.id,
        listing.title,
        req.email
    );

    Ok(HttpResponse::Ok().json(ApplyResponse {
        success: true,
        request_id,
    }))
}

/// Forward geocoding lookup
///
/// GET /api/v1/geocode?q=durham
///
/// Never fails: when the geocoder is unavailable the text comes back with
/// `coords: null`.
async fn geocode(state: web::Data<AppState>, query: web::Query<GeocodeQuery>) -> HttpResponse {
    let resolved = state.geocoder.resolve(&query.q).await;
    HttpResponse::Ok().json(GeocodeResponse {
        location: resolved.name,
        coords: resolved.coords,
    })
}
