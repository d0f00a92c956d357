mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{campaign::CampaignPipeline, config::Config, store::Store, Result};

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub pipeline: Arc<CampaignPipeline>,
}

pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(_config: &Config, store: Arc<dyn Store>, pipeline: Arc<CampaignPipeline>) -> Self {
        Self {
            state: Arc::new(AppState { store, pipeline }),
        }
    }

    pub fn build_router(self) -> Router {
        Router::new()
            .route("/health", get(routes::health))
            .route("/campaigns/generate", post(routes::generate_campaign))
            .route("/campaigns", get(routes::list_campaigns))
            .route("/campaigns/{id}", get(routes::get_campaign))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state)
    }

    pub async fn start(self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.build_router()).await?;
        Ok(())
    }
}
