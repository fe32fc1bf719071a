use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::{ContinueSearch, LookupTicket};
use crate::models::{
    ContinueSearchResponse, Coordinates, CurrentLocationRequest, HistoryLink, HistoryResponse,
    ListingCard, NavigationParams, RecordSearchRequest, RecordSearchResponse, SearchHistoryEntry,
    SessionQuery,
};
use crate::routes::{ApiError, AppState};
use crate::services::ResolvedLocation;

/// Configure landing-page and search-history routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/landing/continue", web::get().to(continue_searching))
        .route("/history", web::get().to(get_history))
        .route("/history", web::post().to(record_search))
        .route(
            "/history/current-location",
            web::post().to(record_current_location),
        );
}

const PROPERTY_KINDS: &str = "Houses, Townhomes, Apartments, Condos";

fn continue_heading(last_location: Option<&str>, no_exact_match: bool) -> String {
    match last_location {
        Some(location) if no_exact_match => format!(
            "No homes available in {}. But these are the Homes available in other locations....",
            location
        ),
        Some(location) => format!(
            "Continue searching for: {}, For Rent, {}",
            location, PROPERTY_KINDS
        ),
        None => format!("Available Rentals: {}", PROPERTY_KINDS),
    }
}

fn history_link(entry: SearchHistoryEntry) -> HistoryLink {
    HistoryLink {
        href: NavigationParams::from(&entry).href(),
        entry,
    }
}

/// Landing-page feed for the session's latest search
///
/// GET /api/v1/landing/continue?sessionId={sessionId}
async fn continue_searching(
    state: web::Data<AppState>,
    query: web::Query<SessionQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let history = state.sessions.load_history(&query.session_id).await?;
    let last_search = history.latest();

    let ContinueSearch {
        listings,
        no_exact_match,
    } = state
        .engine
        .continue_search(state.catalog.all(), last_search);

    let heading = continue_heading(last_search.map(|e| e.location.as_str()), no_exact_match);
    let properties = listings.into_iter().map(ListingCard::from).collect();

    Ok(HttpResponse::Ok().json(ContinueSearchResponse {
        heading,
        properties,
        no_exact_match,
        last_search: last_search.cloned().map(history_link),
    }))
}

/// GET /api/v1/history?sessionId={sessionId}
///
/// Most recent first.
async fn get_history(
    state: web::Data<AppState>,
    query: web::Query<SessionQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let history = state.sessions.load_history(&query.session_id).await?;

    Ok(HttpResponse::Ok().json(HistoryResponse {
        session_id: query.into_inner().session_id,
        entries: history.into_entries().into_iter().map(history_link).collect(),
    }))
}

/// Geocode a typed location and remember it
///
/// POST /api/v1/history
///
/// Request body:
/// ```json
/// {
///   "sessionId": "string",
///   "query": "Durham"
/// }
/// ```
async fn record_search(
    state: web::Data<AppState>,
    req: web::Json<RecordSearchRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let ticket = state.sequencer.begin(&req.session_id);
    let resolved = state.geocoder.resolve(&req.query).await;
    if resolved.name.trim().is_empty() {
        return Err(ApiError::Validation("Location is required".to_string()));
    }

    remember(&state, ticket, resolved).await
}

/// Reverse-geocode the browser position and remember it
///
/// POST /api/v1/history/current-location
async fn record_current_location(
    state: web::Data<AppState>,
    req: web::Json<CurrentLocationRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let ticket = state.sequencer.begin(&req.session_id);
    let resolved = state
        .geocoder
        .resolve_reverse(Coordinates::new(req.lng, req.lat))
        .await;

    remember(&state, ticket, resolved).await
}

async fn remember(
    state: &AppState,
    ticket: LookupTicket,
    resolved: ResolvedLocation,
) -> Result<HttpResponse, ApiError> {
    let entry = SearchHistoryEntry::new(resolved.name, resolved.coords, chrono::Utc::now());

    // The sequencer is consulted under the session lock, so a newer lookup
    // that completes first is also written first
    let recorded = state
        .sessions
        .record_search_if(ticket.key(), entry.clone(), || {
            state.sequencer.complete(&ticket)
        })
        .await?;

    let stale = recorded.is_none();
    if stale {
        tracing::info!(
            "Lookup {} for '{}' finished after a newer one in session {}, not recorded",
            ticket.seq(),
            entry.location,
            ticket.key()
        );
    }

    Ok(HttpResponse::Ok().json(RecordSearchResponse {
        link: history_link(entry),
        stale,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support;
    use actix_web::{http::StatusCode, test, App};

    #[std::prelude::v1::test]
    fn test_continue_headings() {
        assert_eq!(
            continue_heading(None, false),
            "Available Rentals: Houses, Townhomes, Apartments, Condos"
        );
        assert_eq!(
            continue_heading(Some("Durham, NC"), false),
            "Continue searching for: Durham, NC, For Rent, Houses, Townhomes, Apartments, Condos"
        );
        assert!(continue_heading(Some("Boise"), true).starts_with("No homes available in Boise."));
    }

    #[actix_web::test]
    async fn test_continue_feed_follows_recorded_search() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/landing/continue?sessionId=s1")
            .to_request();
        let body: ContinueSearchResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.properties.len(), 6);
        assert!(!body.no_exact_match);
        assert!(body.last_search.is_none());

        // No geocoder token: the text is recorded without coordinates
        let req = test::TestRequest::post()
            .uri("/history")
            .set_json(serde_json::json!({"sessionId": "s1", "query": "Cary"}))
            .to_request();
        let recorded: RecordSearchResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!recorded.stale);
        assert_eq!(recorded.link.href, "/rentals?location=Cary");

        let req = test::TestRequest::get()
            .uri("/landing/continue?sessionId=s1")
            .to_request();
        let body: ContinueSearchResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!body.no_exact_match);
        assert!(body.properties.iter().all(|p| p.location.contains("Cary")));
        assert!(body.heading.starts_with("Continue searching for: Cary"));
    }

    #[actix_web::test]
    async fn test_record_search_stores_geocoded_coordinates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"features": [{"place_name": "Durham, North Carolina, United States",
                                  "center": [-78.8986, 35.994]}]}"#,
            )
            .create_async()
            .await;

        let geocoder =
            crate::services::GeocodingClient::new(server.url(), Some("t".to_string()), 5).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state_with_geocoder(geocoder)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/history")
            .set_json(serde_json::json!({"sessionId": "geo", "query": "durham"}))
            .to_request();
        let body: RecordSearchResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.link.entry.location, "Durham, North Carolina, United States");
        assert!(body.link.href.ends_with("&lat=35.994&lng=-78.8986"));

        let req = test::TestRequest::get()
            .uri("/landing/continue?sessionId=geo")
            .to_request();
        let feed: ContinueSearchResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!feed.no_exact_match);
        assert!(feed.properties.iter().all(|p| p.location.starts_with("Durham")));
    }

    #[actix_web::test]
    async fn test_continue_feed_falls_back_for_unknown_location() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/history")
            .set_json(serde_json::json!({"sessionId": "s2", "query": "Anchorage"}))
            .to_request();
        let _: RecordSearchResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/landing/continue?sessionId=s2")
            .to_request();
        let body: ContinueSearchResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.no_exact_match);
        assert_eq!(body.properties.len(), 6);
        assert_eq!(body.properties[0].id, "1");
    }

    #[actix_web::test]
    async fn test_slower_older_lookup_is_not_recorded() {
        let state = test_support::state();
        let older = state.sequencer.begin("s6");
        let newer = state.sequencer.begin("s6");

        let place = |name: &str| ResolvedLocation {
            name: name.to_string(),
            coords: None,
        };

        let resp = remember(&state, newer, place("Raleigh")).await.unwrap();
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let applied: RecordSearchResponse = serde_json::from_slice(&body).unwrap();
        assert!(!applied.stale);

        let resp = remember(&state, older, place("Durham")).await.unwrap();
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let dropped: RecordSearchResponse = serde_json::from_slice(&body).unwrap();
        assert!(dropped.stale);
        assert_eq!(dropped.link.entry.location, "Durham");

        let history = state.sessions.load_history("s6").await.unwrap();
        let locations: Vec<_> = history.entries().iter().map(|e| e.location.as_str()).collect();
        assert_eq!(locations, vec!["Raleigh"]);
    }

    #[actix_web::test]
    async fn test_history_keeps_latest_first() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .configure(configure),
        )
        .await;

        for place in ["Durham", "Raleigh", "Apex"] {
            let req = test::TestRequest::post()
                .uri("/history")
                .set_json(serde_json::json!({"sessionId": "s3", "query": place}))
                .to_request();
            let _: RecordSearchResponse = test::call_and_read_body_json(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/history?sessionId=s3").to_request();
        let body: HistoryResponse = test::call_and_read_body_json(&app, req).await;
        let locations: Vec<_> = body.entries.iter().map(|e| e.entry.location.as_str()).collect();
        assert_eq!(locations, vec!["Apex", "Raleigh", "Durham"]);
    }

    #[actix_web::test]
    async fn test_current_location_falls_back_to_coordinates() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/history/current-location")
            .set_json(serde_json::json!({"sessionId": "s4", "lat": 35.99, "lng": -78.9}))
            .to_request();
        let body: RecordSearchResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.link.entry.location, "35.99000, -78.90000");
        assert!(body.link.entry.coords.is_some());
    }

    #[actix_web::test]
    async fn test_blank_query_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/history")
            .set_json(serde_json::json!({"sessionId": "s5", "query": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
