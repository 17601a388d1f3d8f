use crate::AppState;
use crate::api::error::AppError;
use crate::utils::cookies::cookie_value;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, Uri, header},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct AuthQuery {
    token: Option<String>,
}

/// Session token from the bearer header, the session cookie, or `?token=`.
pub fn session_token(headers: &HeaderMap, uri: &Uri, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    bearer
        .or_else(|| cookie_value(headers, cookie_name).map(|s| s.to_string()))
        .or_else(|| {
            let query = uri.query().unwrap_or_default();
            serde_urlencoded::from_str::<AuthQuery>(query)
                .ok()
                .and_then(|q| q.token)
        })
        .filter(|t| !t.is_empty())
}

/// Rejects the request with 401 unless the session resolves to an identity.
/// The resolved `IdentityUser` is inserted as a request extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(req.headers(), req.uri(), &state.config.session_cookie_name);

    match state.auth.current_identity(token.as_deref()).await {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            tracing::warn!("🔒 Unauthenticated {} {}", req.method(), req.uri().path());
            Err(AppError::Unauthorized("Unauthorized".to_string()))
        }
    }
}
