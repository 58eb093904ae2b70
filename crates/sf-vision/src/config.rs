//! Azure OpenAI configuration

use serde::{Deserialize, Serialize};
use sf_core::{Error, Result};
use std::env;

/// Configuration for the Azure OpenAI client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureOpenAiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

impl AzureOpenAiConfig {
    pub const DEFAULT_DEPLOYMENT: &'static str = "GPT4-Vision";
    pub const DEFAULT_API_VERSION: &'static str = "2024-12-01-preview";

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("AZURE_OPENAI_API_KEY").ok_or_else(|| {
            Error::Configuration("AZURE_OPENAI_API_KEY environment variable not found".to_string())
        })?;

        let endpoint = get("AZURE_OPENAI_ENDPOINT").ok_or_else(|| {
            Error::Configuration("AZURE_OPENAI_ENDPOINT environment variable not found".to_string())
        })?;

        let deployment =
            get("AZURE_OPENAI_DEPLOYMENT").unwrap_or_else(|| Self::DEFAULT_DEPLOYMENT.to_string());

        let api_version =
            get("AZURE_OPENAI_API_VERSION").unwrap_or_else(|| Self::DEFAULT_API_VERSION.to_string());

        Ok(Self {
            api_key,
            endpoint,
            deployment,
            api_version,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            deployment: Self::DEFAULT_DEPLOYMENT.to_string(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Chat completions URL for the configured deployment
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

/// Show only the first and last five characters of a secret
pub fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 10 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{}...{}", head, tail)
}
