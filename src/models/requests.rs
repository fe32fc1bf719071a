use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Identifies the anonymous browsing session that owns history and favorites
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionQuery {
    #[validate(length(min = 1, max = 128))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
}

/// Request to geocode a typed location and remember it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordSearchRequest {
    #[validate(length(min = 1, max = 128))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
    #[validate(length(min = 1, max = 200))]
    pub query: String,
}

/// Request to reverse-geocode the browser position and remember it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CurrentLocationRequest {
    #[validate(length(min = 1, max = 128))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

/// Free-text geocoding lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Full name is required"))]
    #[serde(alias = "first_name", rename = "firstName")]
    pub first_name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Rental application form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7, max = 32))]
    pub phone: String,
    #[serde(default = "default_apply_message")]
    #[validate(length(max = 2000))]
    pub message: String,
}

/// Rejects empty and whitespace-only text
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub fn default_apply_message() -> String {
    "I'm interested in your property and would like to move forward. \
     Can you send me an application for this property?"
        .to_string()
}
