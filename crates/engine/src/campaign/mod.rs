//! Campaign generation domain: the typed workflow state, the three
//! generation steps, and the pipeline that wires them into a state graph.

mod pipeline;
mod prompts;
mod state;
mod steps;

pub use pipeline::{
    CampaignPipeline, NODE_GENERATE_COPY, NODE_GENERATE_IMAGE_PROMPT, NODE_GENERATE_TARGETING,
};
pub use state::{BusinessInfo, CampaignInfo, CampaignState};
pub use steps::{CopyStep, ImagePromptStep, TargetingStep};
