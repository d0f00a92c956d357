//! Generate a campaign end to end without a server or an API key.
//!
//! Run with: cargo run --example generate_campaign

use std::sync::Arc;

use campaignforge_engine::campaign::{BusinessInfo, CampaignInfo, CampaignPipeline};
use campaignforge_engine::llm::MockProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("campaignforge_engine=info")
        .init();

    let pipeline = CampaignPipeline::new(Arc::new(MockProvider));

    let state = pipeline
        .generate(
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
        .await?;

    println!("=== Ad Copy ===\n{}\n", state.ad_copy.unwrap_or_default());
    println!(
        "=== Image Prompt ===\n{}\n",
        state.image_prompt.unwrap_or_default()
    );
    println!(
        "=== Targeting ===\n{}",
        state.targeting_recommendations.unwrap_or_default()
    );

    Ok(())
}
