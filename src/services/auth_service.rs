use crate::entities::{prelude::*, users};
use crate::services::identity::{IdentityProvider, IdentityUser};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Outcome of resolving the current user.
///
/// `status` follows HTTP semantics: 200 for a returning user, 201 for a user
/// registered on this call, 401 when there is no valid session and 500 when
/// the user record could not be written.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResolution {
    pub is_authenticated: bool,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub user: Option<users::Model>,
}

impl AuthResolution {
    pub fn unauthenticated(status: u16) -> Self {
        Self {
            is_authenticated: false,
            status,
            user: None,
        }
    }

    /// Authenticated, and either newly registered or already known.
    pub fn is_success(&self) -> bool {
        self.is_authenticated && matches!(self.status, 200 | 201)
    }
}

pub struct AuthService {
    db: DatabaseConnection,
    identity: Arc<dyn IdentityProvider>,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { db, identity }
    }

    /// Resolves the session into an identity, without touching the user store.
    pub async fn current_identity(&self, session_token: Option<&str>) -> Option<IdentityUser> {
        let token = session_token?;
        match self.identity.get_user(token).await {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("🔒 Session rejected: {}", e);
                None
            }
        }
    }

    /// Resolves the session and makes sure a local user row exists for it.
    pub async fn authenticate(&self, session_token: Option<&str>) -> AuthResolution {
        let Some(identity) = self.current_identity(session_token).await else {
            return AuthResolution::unauthenticated(401);
        };

        match self.upsert_user(&identity).await {
            Ok((user, created)) => AuthResolution {
                is_authenticated: true,
                status: if created { 201 } else { 200 },
                user: Some(user),
            },
            Err(e) => {
                error!("Failed to persist user {}: {:?}", identity.id, e);
                AuthResolution::unauthenticated(500)
            }
        }
    }

    async fn upsert_user(&self, identity: &IdentityUser) -> Result<(users::Model, bool), sea_orm::DbErr> {
        let existing = Users::find()
            .filter(users::Column::ExternalId.eq(&identity.id))
            .one(&self.db)
            .await?;

        if let Some(user) = existing {
            let unchanged = user.email == identity.email
                && user.first_name == identity.given_name
                && user.last_name == identity.family_name
                && user.picture == identity.picture;
            if unchanged {
                return Ok((user, false));
            }

            let mut active = user.into_active_model();
            active.email = Set(identity.email.clone());
            active.first_name = Set(identity.given_name.clone());
            active.last_name = Set(identity.family_name.clone());
            active.picture = Set(identity.picture.clone());
            active.updated_at = Set(Utc::now());
            let updated = active.update(&self.db).await?;
            return Ok((updated, false));
        }

        let now = Utc::now();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            external_id: Set(identity.id.clone()),
            email: Set(identity.email.clone()),
            first_name: Set(identity.given_name.clone()),
            last_name: Set(identity.family_name.clone()),
            picture: Set(identity.picture.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = user.insert(&self.db).await?;
        info!("👤 Registered new user {} ({})", created.id, created.external_id);
        Ok((created, true))
    }
}
