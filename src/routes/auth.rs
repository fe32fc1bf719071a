use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest, HttpResponse};
use std::future::Future;
use std::pin::Pin;
use validator::Validate;

use crate::models::{AuthResponse, SessionResponse, SignInRequest, SignUpRequest};
use crate::routes::{ApiError, AppState};
use crate::services::SessionContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/signup", web::post().to(sign_up))
        .route("/auth/signin", web::post().to(sign_in))
        .route("/auth/signout", web::post().to(sign_out))
        .route("/auth/me", web::get().to(current_user));
}

/// Token from `Authorization: Bearer <token>`
fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

impl FromRequest for SessionContext {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let accounts = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.accounts.clone());
        let token = bearer_token(req);

        Box::pin(async move {
            let accounts = accounts
                .ok_or_else(|| ApiError::Internal("Application state is not configured".into()))?;
            Ok(SessionContext::from_token(accounts, token).await?)
        })
    }
}

/// Create an account and sign it in
///
/// POST /api/v1/auth/signup
///
/// Request body:
/// ```json
/// {
///   "email": "string",
///   "firstName": "string",
///   "password": "at least 8 characters"
/// }
/// ```
async fn sign_up(
    state: web::Data<AppState>,
    req: web::Json<SignUpRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let (token, user) = state
        .accounts
        .sign_up(&req.email, &req.first_name, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(AuthResponse { token, user }))
}

/// POST /api/v1/auth/signin
async fn sign_in(
    state: web::Data<AppState>,
    req: web::Json<SignInRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let (token, user) = state.accounts.sign_in(&req.email, &req.password).await?;

    tracing::info!("User {} signed in", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse { token, user }))
}

/// POST /api/v1/auth/signout
async fn sign_out(session: SessionContext) -> Result<HttpResponse, ApiError> {
    if session.current_user().is_none() {
        return Err(ApiError::Unauthorized);
    }
    session.sign_out().await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/auth/me
///
/// `user` is null for anonymous callers.
async fn current_user(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        user: session.current_user().cloned(),
    })
}
