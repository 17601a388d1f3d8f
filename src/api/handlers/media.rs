use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::parse_json_body;
use crate::utils::validation::validate_object_key;
use axum::{Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const SIGNED_URL_FAILED: &str = "Failed to generate signed URL";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlRequest {
    pub key: Option<String>,
    /// Lifetime in seconds, 1..=604800 (default 3600)
    #[validate(range(min = 1, max = 604800))]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignedUrlResponse {
    pub success: bool,
    pub url: String,
}

#[utoipa::path(
    post,
    path = "/api/media/signed-url",
    request_body = SignedUrlRequest,
    responses(
        (status = 200, description = "Signed URL minted", body = SignedUrlResponse),
        (status = 400, description = "Missing key or invalid expiry"),
        (status = 500, description = "Storage provider failure")
    ),
    tag = "media"
)]
pub async fn create_signed_url(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SignedUrlResponse>, AppError> {
    let req: SignedUrlRequest = parse_json_body(&body)?;

    let key = validate_object_key(req.key.as_deref())
        .map_err(|e| AppError::BadRequest(e.message))?;
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let expires_in = req
        .expires_in
        .map(|secs| secs as u64)
        .unwrap_or(state.config.signed_url_default_expiry_secs);

    let url = state
        .storage
        .generate_signed_url(key, expires_in)
        .await
        .map_err(|e| AppError::Upstream(e.message_or(SIGNED_URL_FAILED).to_string()))?;

    tracing::debug!("🔗 Signed URL for {} ({}s)", key, expires_in);

    Ok(Json(SignedUrlResponse { success: true, url }))
}
