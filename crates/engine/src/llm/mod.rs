//! LLM provider abstraction.
//!
//! A unified interface over the model backends (via Rig). Providers are
//! explicitly constructed and injected into the generation steps; nothing in
//! this crate holds a process-global client.

mod provider;

pub use provider::{
    create_provider, AnthropicProvider, LlmConfig, LlmProvider, MockProvider, OpenAiProvider,
};

#[cfg(test)]
pub use provider::MockLlmProvider;
