use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{FavoritesResponse, SessionQuery, ToggleFavoriteResponse};
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/favorites", web::get().to(get_favorites))
        .route("/favorites/{id}", web::post().to(toggle_favorite));
}

/// GET /api/v1/favorites?sessionId={sessionId}
async fn get_favorites(
    state: web::Data<AppState>,
    query: web::Query<SessionQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let favorites = state.sessions.load_favorites(&query.session_id).await?;

    Ok(HttpResponse::Ok().json(FavoritesResponse {
        count: favorites.len(),
        favorites: favorites.ids().to_vec(),
        session_id: query.into_inner().session_id,
    }))
}

/// Flip a listing in or out of the session's favorites
///
/// POST /api/v1/favorites/{id}?sessionId={sessionId}
async fn toggle_favorite(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SessionQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let listing_id = path.into_inner();
    if state.catalog.get(&listing_id).is_none() {
        return Err(ApiError::NotFound(format!("Listing {} not found", listing_id)));
    }

    let (favorites, favorited) = state
        .sessions
        .toggle_favorite(&query.session_id, &listing_id)
        .await?;

    tracing::debug!(
        "Session {} {} listing {}",
        query.session_id,
        if favorited { "saved" } else { "removed" },
        listing_id
    );

    Ok(HttpResponse::Ok().json(ToggleFavoriteResponse {
        listing_id,
        favorited,
        count: favorites.len(),
    }))
}
