use crate::utils::auth::{Claims, validate_session_token};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Identity as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct IdentityUser {
    pub id: String,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

impl From<Claims> for IdentityUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            given_name: claims.given_name,
            family_name: claims.family_name,
            picture: claims.picture,
        }
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid session: {0}")]
    InvalidSession(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the user behind a session token.
    async fn get_user(&self, session_token: &str) -> Result<IdentityUser, IdentityError>;
}

/// Verifies session tokens minted by the identity provider.
pub struct JwtIdentityProvider {
    secret: String,
}

impl JwtIdentityProvider {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn get_user(&self, session_token: &str) -> Result<IdentityUser, IdentityError> {
        validate_session_token(session_token, &self.secret)
            .map(IdentityUser::from)
            .map_err(|e| IdentityError::InvalidSession(e.to_string()))
    }
}
