//! Vision model trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::Result;

/// Configuration for a multimodal generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: Some(0.7),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Trait for hosted vision-language models
///
/// Implementations send one image plus a text prompt and return the model's
/// free-form reply. Any failure along the way (transport, auth, an empty or
/// malformed reply) is reported as an error; callers do not retry.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Describe `image` according to `prompt`
    async fn describe_image(&self, image: &[u8], media_type: &str, prompt: &str) -> Result<String>;

    /// Get the model or deployment identifier being used
    fn model_id(&self) -> &str;
}
