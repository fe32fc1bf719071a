use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::{CriteriaError, ErrorResponse};
use crate::services::{AuthError, CacheError};

/// Failure surfaced by a handler, rendered as an `ErrorResponse` body
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error("{0}")]
    NotFound(String),

    #[error("Sign in required")]
    Unauthorized,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("{0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl ApiError {
    fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Criteria(_) => "Validation failed",
            Self::NotFound(_) | Self::Auth(AuthError::UserNotFound) => "Not found",
            Self::Unauthorized | Self::Auth(AuthError::InvalidPassword) => "Unauthorized",
            Self::Auth(AuthError::EmailTaken(_)) => "Conflict",
            Self::Auth(_) | Self::Cache(_) | Self::Internal(_) => "Internal error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Criteria(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Auth(AuthError::UserNotFound) => StatusCode::NOT_FOUND,
            Self::Unauthorized | Self::Auth(AuthError::InvalidPassword) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::EmailTaken(_)) => StatusCode::CONFLICT,
            Self::Auth(_) | Self::Cache(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.label().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}
