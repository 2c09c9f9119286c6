//! Client side of the relay protocol

use super::profile::UserProfile;
use super::WidgetError;
use crate::api::{ChatRequest, ChatResponse, SaveUserRequest};
use async_trait::async_trait;
use reqwest::Client;

/// Connection from the widget to the relay backend
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Send one chat message and wait for the reply
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, WidgetError>;

    /// Report onboarding details
    async fn save_user(&self, profile: &UserProfile) -> Result<(), WidgetError>;
}

/// Relay client over HTTP
pub struct HttpRelayClient {
    client: Client,
    base_url: String,
}

impl HttpRelayClient {
    pub fn new(base_url: &str) -> Result<Self, WidgetError> {
        let client = Client::builder()
            .build()
            .map_err(|e| WidgetError::Transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, WidgetError> {
        let response = self
            .client
            .post(self.url("/chat"))
            .json(request)
            .send()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;

        // Error statuses still carry a displayable reply
        let status = response.status();
        let body = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| WidgetError::Decode(e.to_string()))?;
        if !status.is_success() {
            tracing::warn!(%status, details = ?body.details, "Relay reported an error");
        }
        Ok(body)
    }

    async fn save_user(&self, profile: &UserProfile) -> Result<(), WidgetError> {
        let request = SaveUserRequest {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        };
        self.client
            .post(self.url("/saveUser"))
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| WidgetError::Transport(e.to_string()))?;
        Ok(())
    }
}
