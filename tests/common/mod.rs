#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use webinar_backend::config::AppConfig;
use webinar_backend::infrastructure::{database, providers};
use webinar_backend::services::assistants::VoiceAssistantProvider;
use webinar_backend::services::auth_service::AuthService;
use webinar_backend::services::identity::IdentityProvider;
use webinar_backend::services::payments::{self, PaymentsProvider};
use webinar_backend::services::storage::{StorageError, StorageResult, StorageService};
use webinar_backend::ui::layout::Templates;
use webinar_backend::utils::auth::{Claims, create_session_token};
use webinar_backend::{AppState, create_app};

pub const TEST_SECRET: &str = "integration_secret";

pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("webinar_backend=debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    database::run_migrations(&db).await.unwrap();
    db
}

#[derive(Clone)]
pub enum Failure {
    Message(String),
    Silent,
}

/// In-memory storage that records every call.
#[derive(Default)]
pub struct MockStorageService {
    pub signed: Mutex<Vec<(String, u64)>>,
    pub deleted: Mutex<Vec<String>>,
    pub uploaded: Mutex<Vec<(String, Vec<u8>, String)>>,
    pub failure: Mutex<Option<Failure>>,
}

impl MockStorageService {
    pub fn failing(failure: Failure) -> Self {
        Self {
            failure: Mutex::new(Some(failure)),
            ..Default::default()
        }
    }

    fn check(&self) -> StorageResult<()> {
        match self.failure.lock().unwrap().clone() {
            None => Ok(()),
            Some(Failure::Message(msg)) => Err(StorageError::Provider(msg)),
            Some(Failure::Silent) => Err(StorageError::Unspecified),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.signed.lock().unwrap().len()
            + self.deleted.lock().unwrap().len()
            + self.uploaded.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn generate_signed_url(&self, key: &str, expires_in_secs: u64) -> StorageResult<String> {
        self.signed
            .lock()
            .unwrap()
            .push((key.to_string(), expires_in_secs));
        self.check()?;
        Ok(format!(
            "https://mock-bucket.s3.amazonaws.com/{}?X-Amz-Expires={}",
            key, expires_in_secs
        ))
    }

    async fn upload_file(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        self.uploaded
            .lock()
            .unwrap()
            .push((key.to_string(), data, content_type.to_string()));
        self.check()
    }

    async fn delete_file(&self, key: &str) -> StorageResult<()> {
        self.deleted.lock().unwrap().push(key.to_string());
        self.check()
    }

    async fn file_exists(&self, _key: &str) -> StorageResult<bool> {
        self.check()?;
        Ok(false)
    }
}

/// Assistant provider returning a fixed list, or failing.
pub struct MockVoiceProvider {
    pub result: Result<Vec<Value>, String>,
}

#[async_trait]
impl VoiceAssistantProvider for MockVoiceProvider {
    async fn list_assistants(&self) -> anyhow::Result<Vec<Value>> {
        self.result.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

pub struct TestApp {
    pub app: Router,
    pub storage: Arc<MockStorageService>,
    pub db: DatabaseConnection,
    pub config: AppConfig,
}

pub struct TestAppBuilder {
    storage: Arc<MockStorageService>,
    assistants: Arc<dyn VoiceAssistantProvider>,
    payments: Arc<dyn PaymentsProvider>,
    identity: Option<Arc<dyn IdentityProvider>>,
    config: AppConfig,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        let config = AppConfig {
            jwt_secret: TEST_SECRET.to_string(),
            ..AppConfig::default()
        };
        Self {
            storage: Arc::new(MockStorageService::default()),
            assistants: Arc::new(MockVoiceProvider { result: Ok(vec![]) }),
            payments: payments::create_provider(None),
            identity: None,
            config,
        }
    }

    pub fn storage(mut self, storage: MockStorageService) -> Self {
        self.storage = Arc::new(storage);
        self
    }

    pub fn assistants(mut self, provider: impl VoiceAssistantProvider + 'static) -> Self {
        self.assistants = Arc::new(provider);
        self
    }

    pub fn payments(mut self, publishable_key: &str) -> Self {
        self.payments = payments::create_provider(Some(publishable_key));
        self
    }

    pub fn identity(mut self, provider: impl IdentityProvider + 'static) -> Self {
        self.identity = Some(Arc::new(provider));
        self
    }

    pub fn config(mut self, f: impl FnOnce(&mut AppConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub async fn build(self) -> TestApp {
        init_tracing();
        let db = setup_test_db().await;
        let identity = self
            .identity
            .unwrap_or_else(|| providers::setup_identity(&self.config));

        let state = AppState {
            db: db.clone(),
            storage: self.storage.clone(),
            auth: Arc::new(AuthService::new(db.clone(), identity)),
            assistants: self.assistants,
            payments: self.payments,
            templates: Arc::new(Templates::new().unwrap()),
            config: self.config.clone(),
        };

        TestApp {
            app: create_app(state),
            storage: self.storage,
            db,
            config: self.config,
        }
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }
}

pub fn session_for(sub: &str) -> String {
    let mut claims = Claims::for_subject(sub);
    claims.email = Some(format!("{}@example.com", sub));
    claims.given_name = Some("Test".to_string());
    create_session_token(&claims, TEST_SECRET).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
