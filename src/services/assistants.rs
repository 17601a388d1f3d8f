use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch assistants";

#[async_trait]
pub trait VoiceAssistantProvider: Send + Sync {
    /// Every assistant configured at the provider, as the provider returns them.
    async fn list_assistants(&self) -> Result<Vec<Value>>;
}

/// Vapi REST client.
pub struct VapiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl VapiProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl VoiceAssistantProvider for VapiProvider {
    async fn list_assistants(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(format!("{}/assistant", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("assistant listing returned {}: {}", status, body));
        }

        Ok(response.json::<Vec<Value>>().await?)
    }
}

/// Stand-in used when no voice-AI credentials are configured.
pub struct UnconfiguredVoiceProvider;

#[async_trait]
impl VoiceAssistantProvider for UnconfiguredVoiceProvider {
    async fn list_assistants(&self) -> Result<Vec<Value>> {
        Err(anyhow!("voice-AI provider is not configured"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AssistantListResponse {
    pub status: u16,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub data: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Lists assistants and wraps the outcome in an envelope. Never fails.
pub async fn list_assistants(provider: &dyn VoiceAssistantProvider) -> AssistantListResponse {
    match provider.list_assistants().await {
        Ok(assistants) => AssistantListResponse {
            status: 200,
            success: true,
            data: Some(assistants),
            message: None,
        },
        Err(e) => {
            tracing::error!("Assistant listing failed: {:?}", e);
            AssistantListResponse {
                status: 500,
                success: false,
                data: None,
                message: Some(FETCH_FAILED_MESSAGE.to_string()),
            }
        }
    }
}
