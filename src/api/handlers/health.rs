use crate::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

/// Object looked up to prove the bucket answers; it does not need to exist.
const STORAGE_PROBE_KEY: &str = "health-check";

#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    fn from_result<T, E>(result: Result<T, E>, describe: impl FnOnce(E) -> String) -> Self {
        match result {
            Ok(_) => Self { up: true, error: None },
            Err(e) => Self {
                up: false,
                error: Some(describe(e)),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every component is up, `degraded` otherwise
    pub status: String,
    pub database: ComponentHealth,
    pub storage: ComponentHealth,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "All components reachable", body = HealthResponse),
        (status = 503, description = "Database or storage unreachable", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ComponentHealth::from_result(state.db.ping().await, |e| e.to_string());
    let storage = ComponentHealth::from_result(
        state.storage.file_exists(STORAGE_PROBE_KEY).await,
        |e| e.message_or("storage unreachable").to_string(),
    );

    let healthy = database.up && storage.up;
    if !healthy {
        tracing::warn!(
            "🩺 Degraded: database={:?} storage={:?}",
            database.error,
            storage.error
        );
    }

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            database,
            storage,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
