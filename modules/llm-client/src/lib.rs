pub mod error;
pub mod types;

pub use error::{LlmError, Result};
pub use types::{ChatMessage, ChatRequest, ChatResponse};

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai";

/// Default model for research queries.
pub const DEFAULT_MODEL: &str = "sonar-pro";

/// Chat-completion seam. The discovery pipeline only ever talks to this
/// trait, so tests can drive it with canned responses.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one system + user prompt pair and return the raw completion text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

pub struct SonarClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl SonarClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: PERPLEXITY_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[async_trait]
impl ChatClient for SonarClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
        };

        debug!(model = %self.model, "Sonar chat request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyCompletion)
    }
}
