//! The three generation steps of the campaign workflow.
//!
//! Each step renders its prompt from the current state, calls the injected
//! provider, and writes exactly one output field. Provider failures are
//! recorded in the state's `error` field instead of being propagated; the
//! pipeline's conditional edges route around the remaining steps.

use std::sync::Arc;

use tracing::error;

use crate::campaign::{prompts, CampaignState};
use crate::llm::LlmProvider;
use crate::Result;

/// Generates the ad copy variations.
pub struct CopyStep {
    provider: Arc<dyn LlmProvider>,
}

impl CopyStep {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub async fn run(&self, mut state: CampaignState) -> CampaignState {
        match self.generate(&state).await {
            Ok(ad_copy) => state.ad_copy = Some(ad_copy),
            Err(e) => {
                error!("Ad copy generation failed: {}", e);
                state.error = Some(format!("Error generating ad copy: {}", e));
            }
        }
        state
    }

    async fn generate(&self, state: &CampaignState) -> Result<String> {
        let prompt = prompts::render_ad_copy_prompt(state)?;
        self.provider.complete(&prompt).await
    }
}

/// Generates the brief for an image generation model.
pub struct ImagePromptStep {
    provider: Arc<dyn LlmProvider>,
}

impl ImagePromptStep {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub async fn run(&self, mut state: CampaignState) -> CampaignState {
        match self.generate(&state).await {
            // image_url stays empty until an image generation backend exists
            Ok(image_prompt) => state.image_prompt = Some(image_prompt),
            Err(e) => {
                error!("Image prompt generation failed: {}", e);
                state.error = Some(format!("Error generating image: {}", e));
            }
        }
        state
    }

    async fn generate(&self, state: &CampaignState) -> Result<String> {
        let prompt = prompts::render_image_prompt_prompt(state)?;
        self.provider.complete(&prompt).await
    }
}

/// Generates audience targeting recommendations.
pub struct TargetingStep {
    provider: Arc<dyn LlmProvider>,
}

impl TargetingStep {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub async fn run(&self, mut state: CampaignState) -> CampaignState {
        match self.generate(&state).await {
            Ok(recommendations) => state.targeting_recommendations = Some(recommendations),
            Err(e) => {
                error!("Targeting generation failed: {}", e);
                state.error = Some(format!("Error generating targeting recommendations: {}", e));
            }
        }
        state
    }

    async fn generate(&self, state: &CampaignState) -> Result<String> {
        let prompt = prompts::render_targeting_prompt(state)?;
        self.provider.complete(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{BusinessInfo, CampaignInfo};
    use crate::llm::MockLlmProvider;
    use crate::Error;

    fn sample_state() -> CampaignState {
        CampaignState::new(
            BusinessInfo {
                business_name: "Acme Coffee".to_string(),
                industry: "Food & Beverage".to_string(),
                target_audience: "young professionals".to_string(),
            },
            CampaignInfo {
                campaign_goal: "increase store visits".to_string(),
                platform: "Instagram".to_string(),
                tone: "friendly".to_string(),
                visual_style: "bright and modern".to_string(),
            },
            None,
        )
    }

    #[tokio::test]
    async fn copy_step_fills_ad_copy() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_complete()
            .returning(|_| Ok("generated copy".to_string()));

        let step = CopyStep::new(Arc::new(provider));
        let state = step.run(sample_state()).await;

        assert_eq!(state.ad_copy.as_deref(), Some("generated copy"));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn copy_step_records_provider_failure_in_state() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_complete()
            .returning(|_| Err(Error::Llm("upstream unavailable".to_string())));

        let step = CopyStep::new(Arc::new(provider));
        let state = step.run(sample_state()).await;

        assert!(state.ad_copy.is_none());
        let error = state.error.unwrap();
        assert!(error.contains("Error generating ad copy"));
        assert!(error.contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn targeting_step_sees_previous_performance_in_prompt() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_complete()
            .withf(|prompt: &str| prompt.contains("CTR 1.2% on last campaign"))
            .returning(|_| Ok("recommendations".to_string()));

        let mut state = sample_state();
        state.previous_performance = Some("CTR 1.2% on last campaign".to_string());

        let step = TargetingStep::new(Arc::new(provider));
        let state = step.run(state).await;

        assert_eq!(state.targeting_recommendations.as_deref(), Some("recommendations"));
    }
}
