//! Azure OpenAI chat-completions client

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use sf_core::{Error, GenerationConfig, Result, VisionModel};

use crate::config::{AzureOpenAiConfig, redact};

/// Azure OpenAI vision client
pub struct AzureOpenAiClient {
    config: AzureOpenAiConfig,
    client: Client,
    generation: GenerationConfig,
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

impl AzureOpenAiClient {
    /// Create a new client from configuration
    pub fn new(config: AzureOpenAiConfig) -> Result<Self> {
        let generation = GenerationConfig::default();
        let client = Client::builder()
            .timeout(generation.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        debug!(
            endpoint = %config.endpoint,
            deployment = %config.deployment,
            api_version = %config.api_version,
            api_key = %redact(&config.api_key),
            "Azure OpenAI client initialized"
        );

        Ok(Self {
            config,
            client,
            generation,
        })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = AzureOpenAiConfig::from_env()?;
        Self::new(config)
    }

    /// Override token budget, temperature and timeout
    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn config(&self) -> &AzureOpenAiConfig {
        &self.config
    }

    fn build_request(&self, image: &[u8], media_type: &str, prompt: &str) -> ChatRequest {
        let data_url = format!("data:{};base64,{}", media_type, STANDARD.encode(image));

        ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            max_tokens: self.generation.max_tokens,
            temperature: self.generation.temperature,
        }
    }

    async fn perform_completion(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(self.config.chat_completions_url())
            .header("api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(Error::Authentication(format!(
                    "Azure OpenAI rejected the API key ({}): {}",
                    status, error_text
                )));
            }
            return Err(Error::VisionModel(format!(
                "Azure OpenAI request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::VisionModel(
                "Empty response from Azure OpenAI".to_string(),
            ));
        }

        debug!(chars = text.len(), "Received model reply");
        Ok(text)
    }
}

#[async_trait]
impl VisionModel for AzureOpenAiClient {
    async fn describe_image(&self, image: &[u8], media_type: &str, prompt: &str) -> Result<String> {
        let request = self.build_request(image, media_type, prompt);

        debug!(
            deployment = %self.config.deployment,
            max_tokens = request.max_tokens,
            image_bytes = image.len(),
            "Sending chat completion request"
        );

        match timeout(self.generation.timeout, self.perform_completion(&request)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout("Request timed out".to_string())),
        }
    }

    fn model_id(&self) -> &str {
        &self.config.deployment
    }
}
