//! Assembles the campaign generation workflow.
//!
//! Three nodes in fixed order (copy, image prompt, targeting). The edges out
//! of the first two are conditional: when a step has recorded an error in the
//! state, the walk short-circuits to END and the caller receives whatever the
//! earlier steps produced.

use std::sync::Arc;

use tracing::info;

use crate::campaign::steps::{CopyStep, ImagePromptStep, TargetingStep};
use crate::campaign::{BusinessInfo, CampaignInfo, CampaignState};
use crate::graph::{StateGraph, END, START};
use crate::llm::LlmProvider;
use crate::Result;

pub const NODE_GENERATE_COPY: &str = "generate_copy";
pub const NODE_GENERATE_IMAGE_PROMPT: &str = "generate_image_prompt";
pub const NODE_GENERATE_TARGETING: &str = "generate_targeting";

/// A compiled campaign workflow, built once and shared across requests.
pub struct CampaignPipeline {
    graph: StateGraph<CampaignState>,
}

impl CampaignPipeline {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        let copy = Arc::new(CopyStep::new(provider.clone()));
        let image = Arc::new(ImagePromptStep::new(provider.clone()));
        let targeting = Arc::new(TargetingStep::new(provider));

        let mut graph = StateGraph::new();
        graph
            .add_node(NODE_GENERATE_COPY, move |state| {
                let step = copy.clone();
                async move { step.run(state).await }
            })
            .add_node(NODE_GENERATE_IMAGE_PROMPT, move |state| {
                let step = image.clone();
                async move { step.run(state).await }
            })
            .add_node(NODE_GENERATE_TARGETING, move |state| {
                let step = targeting.clone();
                async move { step.run(state).await }
            })
            .add_edge(START, NODE_GENERATE_COPY)
            .add_conditional_edge(NODE_GENERATE_COPY, |state: &CampaignState| {
                if state.has_error() {
                    END.to_string()
                } else {
                    NODE_GENERATE_IMAGE_PROMPT.to_string()
                }
            })
            .add_conditional_edge(NODE_GENERATE_IMAGE_PROMPT, |state: &CampaignState| {
                if state.has_error() {
                    END.to_string()
                } else {
                    NODE_GENERATE_TARGETING.to_string()
                }
            })
            .add_edge(NODE_GENERATE_TARGETING, END);

        Self { graph }
    }

    /// Runs the full workflow and returns the final state.
    ///
    /// Step-level failures surface only through the state's `error` field; an
    /// `Err` here means the graph itself is misconfigured.
    pub async fn generate(
        &self,
        business_info: BusinessInfo,
        campaign_info: CampaignInfo,
        previous_performance: Option<String>,
    ) -> Result<CampaignState> {
        info!(
            "Generating campaign for business: {}",
            business_info.business_name
        );
        let initial = CampaignState::new(business_info, campaign_info, previous_performance);
        self.graph.invoke(initial).await
    }
}
