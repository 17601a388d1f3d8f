use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::parse_json_body;
use crate::services::identity::IdentityUser;
use crate::utils::validation::{sanitize_filename, upload_object_key, validate_object_key};
use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DELETE_FAILED: &str = "Failed to delete file";
pub const UPLOAD_FAILED: &str = "Failed to upload file";

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteRequest {
    pub key: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub key: String,
    pub url: String,
}

/// Registered for both DELETE and POST on `/api/upload/delete`.
#[utoipa::path(
    delete,
    path = "/api/upload/delete",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Object deleted", body = DeleteResponse),
        (status = 400, description = "Missing key"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Storage provider failure")
    ),
    security(
        ("session" = [])
    ),
    tag = "upload"
)]
pub async fn delete_file(
    State(state): State<AppState>,
    Extension(user): Extension<IdentityUser>,
    body: Bytes,
) -> Result<Json<DeleteResponse>, AppError> {
    let req: DeleteRequest = parse_json_body(&body)?;
    let key = validate_object_key(req.key.as_deref())
        .map_err(|e| AppError::BadRequest(e.message))?;

    state
        .storage
        .delete_file(key)
        .await
        .map_err(|e| AppError::Upstream(e.message_or(DELETE_FAILED).to_string()))?;

    tracing::info!("🗑️  Deleted {} for user={}", key, user.id);

    Ok(Json(DeleteResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = Vec<u8>, description = "Multipart form with a `file` field", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing or invalid file"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Storage provider failure")
    ),
    security(
        ("session" = [])
    ),
    tag = "upload"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(user): Extension<IdentityUser>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = sanitize_filename(field.file_name().unwrap_or_default())
            .map_err(|e| AppError::BadRequest(e.message))?;
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if data.len() > state.config.max_upload_size {
            return Err(AppError::BadRequest(format!(
                "File exceeds the {} MB upload limit",
                state.config.max_upload_size / 1024 / 1024
            )));
        }

        let key = upload_object_key(&user.id, &filename);
        let size = data.len();

        state
            .storage
            .upload_file(&key, data.to_vec(), &content_type)
            .await
            .map_err(|e| AppError::Upstream(e.message_or(UPLOAD_FAILED).to_string()))?;

        let url = state
            .storage
            .generate_signed_url(&key, state.config.signed_url_default_expiry_secs)
            .await
            .map_err(|e| {
                AppError::Upstream(
                    e.message_or(crate::api::handlers::media::SIGNED_URL_FAILED)
                        .to_string(),
                )
            })?;

        tracing::info!(
            "📤 Stored {} ({} bytes, {}) for user={}",
            key,
            size,
            content_type,
            user.id
        );

        return Ok(Json(UploadResponse {
            success: true,
            key,
            url,
        }));
    }

    Err(AppError::BadRequest("Missing file field".to_string()))
}
