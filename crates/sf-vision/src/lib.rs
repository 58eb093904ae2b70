//! Azure OpenAI integration for Style-Finder
//!
//! This crate provides the Azure OpenAI implementation of the VisionModel trait.

mod client;
mod config;


pub use client::AzureOpenAiClient;
pub use config::{AzureOpenAiConfig, redact};

// Re-export core types for convenience
pub use sf_core::{Error, GenerationConfig, Result, VisionModel};
