use std::env;

/// Upper bound S3 accepts for a presigned URL lifetime (7 days).
pub const MAX_SIGNED_URL_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Runtime configuration for the webinar backend
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string (default: in-memory SQLite)
    pub database_url: String,

    /// S3-compatible endpoint; `None` uses the AWS default resolution
    pub s3_endpoint: Option<String>,
    /// S3 region (default: "us-east-1")
    pub s3_region: String,
    /// Bucket holding webinar media
    pub s3_bucket: String,
    /// Static access key (optional, falls back to the AWS credential chain)
    pub s3_access_key: Option<String>,
    /// Static secret key
    pub s3_secret_key: Option<String>,

    /// Default signed URL lifetime in seconds (default: 3600)
    pub signed_url_default_expiry_secs: u64,

    /// Maximum multipart upload size in bytes (default: 100 MB)
    pub max_upload_size: usize,

    /// Secret used to verify identity-provider session tokens
    pub jwt_secret: String,
    /// Name of the cookie carrying the session token
    pub session_cookie_name: String,
    /// Hosted sign-in page of the identity provider
    pub sign_in_url: Option<String>,

    /// Voice-AI provider credentials
    pub vapi_api_key: Option<String>,
    pub vapi_base_url: String,

    /// Publishable key handed to the browser payment form
    pub stripe_publishable_key: Option<String>,

    /// Allowed CORS Origins (comma separated)
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            s3_endpoint: None,
            s3_region: "us-east-1".to_string(),
            s3_bucket: "webinar-media".to_string(),
            s3_access_key: None,
            s3_secret_key: None,
            signed_url_default_expiry_secs: 3600,
            max_upload_size: 100 * 1024 * 1024, // 100 MB
            jwt_secret: "secret".to_string(),
            session_cookie_name: "session".to_string(),
            sign_in_url: None,
            vapi_api_key: None,
            vapi_base_url: "https://api.vapi.ai".to_string(),
            stripe_publishable_key: None,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),

            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            s3_region: env::var("S3_REGION").unwrap_or(default.s3_region),
            s3_bucket: env::var("S3_BUCKET").unwrap_or(default.s3_bucket),
            s3_access_key: env::var("S3_ACCESS_KEY").ok(),
            s3_secret_key: env::var("S3_SECRET_KEY").ok(),

            signed_url_default_expiry_secs: env::var("SIGNED_URL_DEFAULT_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| (1..=MAX_SIGNED_URL_EXPIRY_SECS).contains(v))
                .unwrap_or(default.signed_url_default_expiry_secs),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            jwt_secret: env::var("JWT_SECRET").unwrap_or(default.jwt_secret),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or(default.session_cookie_name),
            sign_in_url: env::var("AUTH_SIGN_IN_URL").ok(),

            vapi_api_key: env::var("VAPI_API_KEY").ok(),
            vapi_base_url: env::var("VAPI_BASE_URL").unwrap_or(default.vapi_base_url),

            stripe_publishable_key: env::var("STRIPE_PUBLISHABLE_KEY").ok(),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Config for local development and tests
    pub fn development() -> Self {
        Self {
            s3_endpoint: Some("http://127.0.0.1:9000".to_string()),
            s3_access_key: Some("minioadmin".to_string()),
            s3_secret_key: Some("minioadmin".to_string()),
            ..Self::default()
        }
    }

    /// Config for production; the JWT secret must come from the environment
    pub fn production() -> Self {
        let from_env = Self::from_env();
        Self {
            jwt_secret: env::var("JWT_SECRET").expect("CRITICAL: JWT_SECRET must be set"),
            database_url: env::var("DATABASE_URL").expect("CRITICAL: DATABASE_URL must be set"),
            ..from_env
        }
    }
}
