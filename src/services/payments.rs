//! Payment provider abstraction
//!
//! The browser renders its payment form inside the provider's own widgets;
//! the server only hands out the client handle those widgets load with.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider is not configured")]
    NotConfigured,

    #[error("invalid payment configuration: {0}")]
    InvalidConfig(String),
}

/// Everything the browser needs to initialise the provider's payment widgets.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentClientHandle {
    pub provider: String,
    pub publishable_key: String,
}

#[async_trait]
pub trait PaymentsProvider: Send + Sync {
    async fn client_handle(&self) -> Result<PaymentClientHandle, PaymentError>;
}

pub struct StripeProvider {
    publishable_key: String,
}

impl StripeProvider {
    pub fn new(publishable_key: String) -> Self {
        Self { publishable_key }
    }
}

#[async_trait]
impl PaymentsProvider for StripeProvider {
    async fn client_handle(&self) -> Result<PaymentClientHandle, PaymentError> {
        // Secret keys must never reach the browser.
        if !self.publishable_key.starts_with("pk_") {
            return Err(PaymentError::InvalidConfig(
                "publishable key must start with pk_".to_string(),
            ));
        }

        Ok(PaymentClientHandle {
            provider: "stripe".to_string(),
            publishable_key: self.publishable_key.clone(),
        })
    }
}

/// Answers every request with `NotConfigured`.
pub struct UnconfiguredPayments;

#[async_trait]
impl PaymentsProvider for UnconfiguredPayments {
    async fn client_handle(&self) -> Result<PaymentClientHandle, PaymentError> {
        Err(PaymentError::NotConfigured)
    }
}

pub fn create_provider(publishable_key: Option<&str>) -> Arc<dyn PaymentsProvider> {
    match publishable_key {
        Some(key) => Arc::new(StripeProvider::new(key.to_string())),
        None => Arc::new(UnconfiguredPayments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stripe_handle() {
        let provider = StripeProvider::new("pk_test_123".to_string());
        let handle = provider.client_handle().await.unwrap();
        assert_eq!(handle.provider, "stripe");
        assert_eq!(handle.publishable_key, "pk_test_123");
    }

    #[tokio::test]
    async fn test_secret_key_is_refused() {
        let provider = StripeProvider::new("sk_live_oops".to_string());
        assert!(matches!(
            provider.client_handle().await,
            Err(PaymentError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_create_provider_without_key() {
        let provider = create_provider(None);
        assert!(matches!(
            provider.client_handle().await,
            Err(PaymentError::NotConfigured)
        ));
        assert!(create_provider(Some("pk_test_1")).client_handle().await.is_ok());
    }
}
