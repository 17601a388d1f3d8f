pub mod assistants;
pub mod auth;
pub mod health;
pub mod media;
pub mod pages;
pub mod payments;
pub mod upload;

use crate::api::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// Decodes a JSON request body regardless of its Content-Type.
///
/// Well-formed JSON with a field of the wrong type is a client error. A body
/// that is not JSON at all is an unexpected failure and surfaces as the
/// generic 500.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| match e.classify() {
        Category::Data => AppError::BadRequest(format!("Invalid request body: {}", e)),
        Category::Syntax | Category::Eof | Category::Io => {
            AppError::Internal(format!("Failed to parse request body: {}", e))
        }
    })
}
