use std::sync::Arc;
use tracing::info;

use campaignforge_engine::{
    campaign::CampaignPipeline, config::Config, llm::create_provider, server::Server,
    store::create_store, Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load()?;

    // Initialize store
    let store = create_store(&config.database).await?;
    store.init().await?;

    // Assemble the campaign workflow around an injected provider
    let provider = create_provider(&config.llm)?;
    let pipeline = Arc::new(CampaignPipeline::new(provider));

    // Initialize server
    let server = Server::new(&config, store, pipeline);

    // Start server
    info!("Starting server on {}", config.server.addr);
    server.start(&config.server.addr).await?;

    Ok(())
}
