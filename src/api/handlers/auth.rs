use crate::AppState;
use crate::api::error::AppError;
use crate::api::middleware::auth::session_token;
use crate::services::auth_service::AuthResolution;
use crate::ui::layout::LayoutContext;
use crate::ui::theme::ThemeContext;
use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;

pub const HOME_ROUTE: &str = "/home";
pub const SIGN_IN_ROUTE: &str = "/sign-in";

/// Where the callback sends the browser for a given resolution.
pub fn callback_redirect_target(resolution: &AuthResolution) -> &'static str {
    if resolution.is_success() {
        HOME_ROUTE
    } else {
        SIGN_IN_ROUTE
    }
}

/// Landing route after the identity provider's redirect.
///
/// Any failure to resolve the user is treated as "not signed in"; nothing
/// is retried.
#[utoipa::path(
    get,
    path = "/callback",
    responses(
        (status = 303, description = "Redirect to /home when authenticated, /sign-in otherwise")
    ),
    tag = "auth"
)]
pub async fn callback(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Redirect {
    let token = session_token(&headers, &uri, &state.config.session_cookie_name);
    let resolution = state.auth.authenticate(token.as_deref()).await;
    let target = callback_redirect_target(&resolution);

    tracing::info!(
        "🔑 Auth callback: authenticated={} status={} -> {}",
        resolution.is_authenticated,
        resolution.status,
        target
    );

    Redirect::to(target)
}

#[utoipa::path(
    get,
    path = "/sign-in",
    responses(
        (status = 303, description = "Redirect to the identity provider's sign-in page"),
        (status = 200, description = "Fallback sign-in page when no provider URL is configured")
    ),
    tag = "auth"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(url) = &state.config.sign_in_url {
        return Ok(Redirect::to(url).into_response());
    }

    let layout = LayoutContext::new(ThemeContext::from_headers(&headers), None);
    let html = state
        .templates
        .render("sign_in.html", &layout, context! {})
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Html(html).into_response())
}
