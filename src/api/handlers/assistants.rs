use crate::AppState;
use crate::services::assistants::{AssistantListResponse, list_assistants};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

#[utoipa::path(
    get,
    path = "/api/assistants",
    responses(
        (status = 200, description = "Assistants configured at the voice-AI provider", body = AssistantListResponse),
        (status = 500, description = "Provider call failed", body = AssistantListResponse)
    ),
    tag = "assistants"
)]
pub async fn get_assistants(State(state): State<AppState>) -> impl IntoResponse {
    let envelope = list_assistants(state.assistants.as_ref()).await;
    let status =
        StatusCode::from_u16(envelope.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope))
}
