use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use rig::completion::Prompt;
use rig::providers::{anthropic, openai};

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4-turbo".to_string(),
            api_key: None,
            temperature: Some(0.7),
            max_tokens: Some(4096),
        }
    }
}

/// A text-completion backend for the generation steps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a prompt and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// OpenAI provider using Rig.
pub struct OpenAiProvider {
    client: openai::Client,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<String>, model: &str) -> Result<Self> {
        let client = match api_key {
            Some(key) => openai::Client::new(&key),
            // Falls back to the OPENAI_API_KEY env var
            None => openai::Client::from_env(),
        };

        Ok(Self {
            client,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let agent = self.client.agent(&self.model).build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| Error::Llm(format!("OpenAI API error: {:?}", e)))
    }
}

/// Anthropic Claude provider using Rig.
pub struct AnthropicProvider {
    client: anthropic::Client,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: Option<String>, model: &str) -> Result<Self> {
        let client = match api_key {
            Some(key) => anthropic::Client::new(
                &key,
                "https://api.anthropic.com",
                None,
                anthropic::ANTHROPIC_VERSION_LATEST,
            ),
            // Falls back to the ANTHROPIC_API_KEY env var
            None => anthropic::Client::from_env(),
        };

        Ok(Self {
            client,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let agent = self.client.agent(&self.model).build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| Error::Llm(format!("Anthropic API error: {:?}", e)))
    }
}

/// Deterministic provider for tests and offline runs.
///
/// Responses are keyed on the persona line of each prompt, so a full
/// pipeline run produces distinct text for every stage.
pub struct MockProvider;

#[async_trait]
impl LlmProvider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.contains("marketing copywriter") {
            Ok("Headline: Fresh Ideas, Delivered.\n\n\
                Discover what everyone in your neighborhood is talking about. \
                Visit us today and see the difference for yourself.\n\n\
                Call to action: Stop by this week."
                .to_string())
        } else if prompt.contains("AI image generators") {
            Ok("A bright, warmly lit scene with the product in sharp focus at \
                the center, soft natural colors, an inviting mood, and clean \
                composition suitable for a social feed."
                .to_string())
        } else if prompt.contains("marketing strategist") {
            Ok("1. Demographic targeting: adults 25-44 with mid-level income.\n\
                2. Geographic targeting: urban areas within delivery range.\n\
                3. Interest-based targeting: lifestyle and local-discovery interests.\n\
                4. Optimal times: weekday evenings and weekend mornings.\n\
                5. Budget allocation: weight spend toward the best-performing placement."
                .to_string())
        } else {
            Ok(format!(
                "Mock response for: {}...",
                prompt.chars().take(40).collect::<String>()
            ))
        }
    }
}

/// Create a provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
    match config.provider.as_str() {
        "openai" => {
            let provider = OpenAiProvider::new(config.api_key.clone(), &config.model)?;
            Ok(Arc::new(provider))
        }
        "anthropic" | "claude" => {
            let provider = AnthropicProvider::new(config.api_key.clone(), &config.model)?;
            Ok(Arc::new(provider))
        }
        "mock" => Ok(Arc::new(MockProvider)),
        other => Err(Error::Config(format!("Unknown LLM provider: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_provider_varies_by_persona() {
        let copy = MockProvider
            .complete("You are an expert marketing copywriter.")
            .await
            .unwrap();
        let image = MockProvider
            .complete("You are an expert at creating prompts for AI image generators.")
            .await
            .unwrap();
        assert_ne!(copy, image);
    }

    #[test]
    fn create_provider_rejects_unknown_backend() {
        let config = LlmConfig {
            provider: "carrier-pigeon".to_string(),
            ..LlmConfig::default()
        };
        assert!(matches!(create_provider(&config), Err(Error::Config(_))));
    }
}
