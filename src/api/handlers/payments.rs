use crate::AppState;
use crate::api::error::AppError;
use crate::services::payments::{PaymentClientHandle, PaymentError};
use axum::{Json, extract::State};

#[utoipa::path(
    get,
    path = "/api/payments/client",
    responses(
        (status = 200, description = "Client handle for the payment form", body = PaymentClientHandle),
        (status = 503, description = "No payment provider configured")
    ),
    tag = "payments"
)]
pub async fn get_client_handle(
    State(state): State<AppState>,
) -> Result<Json<PaymentClientHandle>, AppError> {
    let handle = state.payments.client_handle().await.map_err(|e| match e {
        PaymentError::NotConfigured => AppError::ServiceUnavailable(e.to_string()),
        PaymentError::InvalidConfig(msg) => AppError::Internal(msg),
    })?;

    Ok(Json(handle))
}
