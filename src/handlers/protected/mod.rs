pub mod auth;
pub mod deals;
pub mod screenings;

use uuid::Uuid;

use crate::error::ApiError;

/// Path ids arrive as strings; reject non-UUIDs with the error envelope.
fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::bad_request(format!("Invalid {} id", what)))
}
