use crate::config::AppConfig;
use crate::services::assistants::{UnconfiguredVoiceProvider, VapiProvider, VoiceAssistantProvider};
use crate::services::identity::{IdentityProvider, JwtIdentityProvider};
use crate::services::payments::{self, PaymentsProvider};
use std::sync::Arc;
use tracing::{info, warn};

pub fn setup_identity(config: &AppConfig) -> Arc<dyn IdentityProvider> {
    Arc::new(JwtIdentityProvider::new(config.jwt_secret.clone()))
}

pub fn setup_voice_provider(config: &AppConfig) -> Arc<dyn VoiceAssistantProvider> {
    match &config.vapi_api_key {
        Some(key) => {
            info!("🎙️  Voice provider: {}", config.vapi_base_url);
            Arc::new(VapiProvider::new(config.vapi_base_url.clone(), key.clone()))
        }
        None => {
            warn!("⚠️  VAPI_API_KEY not set, assistant listing will fail");
            Arc::new(UnconfiguredVoiceProvider)
        }
    }
}

pub fn setup_payments(config: &AppConfig) -> Arc<dyn PaymentsProvider> {
    if config.stripe_publishable_key.is_none() {
        warn!("⚠️  STRIPE_PUBLISHABLE_KEY not set, payment form disabled");
    }
    payments::create_provider(config.stripe_publishable_key.as_deref())
}
