//! LLM client module
//!
//! Provides the text-generation collaborator behind the agent. The
//! collaborator is treated as unreliable and possibly slow: every call
//! carries a bounded timeout and callers degrade gracefully on failure.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;

pub use client::{LlmClient, UnavailableClient};
pub use error::LlmError;
pub use gemini::GeminiClient;

use crate::config::LlmConfig;

/// A single text-generation request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Optional system/steering context prepended to the prompt
    pub system_context: Option<String>,
    /// The fully rendered prompt
    pub prompt: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Create a plain request with the default token budget
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system_context: None,
            prompt: prompt.into(),
            max_tokens: 2048,
        }
    }

    /// Attach a system context
    pub fn with_system(mut self, context: impl Into<String>) -> Self {
        self.system_context = Some(context.into());
        self
    }
}

/// Create an LLM client based on the provider specified in config
///
/// Supports the "gemini" provider (the default); the provider tag exists so
/// a different backend can be wired in without touching call sites.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: gemini",
                other
            )))
        }
    }
}
