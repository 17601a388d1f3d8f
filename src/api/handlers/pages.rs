use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::auth::SIGN_IN_ROUTE;
use crate::api::middleware::auth::session_token;
use crate::ui::layout::LayoutContext;
use crate::ui::onboarding::ONBOARDING_STEPS;
use crate::ui::theme::ThemeContext;
use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::{Value, context};

/// Renders `page` for a signed-in user, or sends anonymous visitors to sign in.
async fn render_authenticated(
    state: &AppState,
    headers: &HeaderMap,
    uri: &Uri,
    page: &str,
    extra: Value,
) -> Result<Response, AppError> {
    let token = session_token(headers, uri, &state.config.session_cookie_name);
    let Some(user) = state.auth.current_identity(token.as_deref()).await else {
        return Ok(Redirect::to(SIGN_IN_ROUTE).into_response());
    };

    let layout = LayoutContext::new(ThemeContext::from_headers(headers), Some(user));
    let html = state
        .templates
        .render(page, &layout, extra)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Html(html).into_response())
}

pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    render_authenticated(&state, &headers, &uri, "home.html", context! {}).await
}

pub async fn onboarding(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    render_authenticated(
        &state,
        &headers,
        &uri,
        "onboarding.html",
        context! { steps => ONBOARDING_STEPS },
    )
    .await
}
