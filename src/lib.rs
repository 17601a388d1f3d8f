pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;
pub mod ui;
pub mod utils;

use crate::config::AppConfig;
use crate::services::assistants::VoiceAssistantProvider;
use crate::services::auth_service::AuthService;
use crate::services::payments::PaymentsProvider;
use crate::services::storage::StorageService;
use crate::ui::layout::Templates;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::callback,
        api::handlers::auth::sign_in,
        api::handlers::media::create_signed_url,
        api::handlers::upload::delete_file,
        api::handlers::upload::upload_file,
        api::handlers::assistants::get_assistants,
        api::handlers::payments::get_client_handle,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::media::SignedUrlRequest,
            api::handlers::media::SignedUrlResponse,
            api::handlers::upload::DeleteRequest,
            api::handlers::upload::DeleteResponse,
            api::handlers::upload::UploadResponse,
            services::assistants::AssistantListResponse,
            services::payments::PaymentClientHandle,
            api::handlers::health::HealthResponse,
            api::handlers::health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Identity provider callback and sign-in"),
        (name = "media", description = "Signed URLs for stored media"),
        (name = "upload", description = "Upload and delete stored objects"),
        (name = "assistants", description = "Voice assistants"),
        (name = "payments", description = "Payment form bootstrap")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn StorageService>,
    pub auth: Arc<AuthService>,
    pub assistants: Arc<dyn VoiceAssistantProvider>,
    pub payments: Arc<dyn PaymentsProvider>,
    pub templates: Arc<Templates>,
    pub config: AppConfig,
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn create_app(state: AppState) -> Router {
    let require_auth = from_fn_with_state(state.clone(), api::middleware::auth::auth_middleware);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/callback", get(api::handlers::auth::callback))
        .route("/sign-in", get(api::handlers::auth::sign_in))
        .route("/home", get(api::handlers::pages::home))
        .route("/onboarding", get(api::handlers::pages::onboarding))
        .route(
            "/api/media/signed-url",
            post(api::handlers::media::create_signed_url),
        )
        .route(
            "/api/upload/delete",
            axum::routing::delete(api::handlers::upload::delete_file)
                .post(api::handlers::upload::delete_file)
                .layer(require_auth.clone()),
        )
        .route(
            "/api/upload",
            post(api::handlers::upload::upload_file)
                .layer(DefaultBodyLimit::max(
                    state.config.max_upload_size + 1024 * 1024, // multipart overhead
                ))
                .layer(require_auth),
        )
        .route(
            "/api/assistants",
            get(api::handlers::assistants::get_assistants),
        )
        .route(
            "/api/payments/client",
            get(api::handlers::payments::get_client_handle),
        )
        .layer(from_fn(api::middleware::security::security_headers))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(cors_layer(&state.config))
        .with_state(state)
}
