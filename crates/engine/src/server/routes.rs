use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::campaign::{BusinessInfo, CampaignInfo};
use crate::server::AppState;
use crate::store::Campaign;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCampaignRequest {
    pub business_info: BusinessInfo,
    pub campaign_info: CampaignInfo,
    #[serde(default)]
    pub previous_performance: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCampaignsParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_limit() -> i64 {
    20
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn generate_campaign(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateCampaignRequest>,
) -> Response {
    if request.business_info.business_name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Business name is required" })),
        )
            .into_response();
    }
    if request.campaign_info.campaign_goal.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Campaign goal is required" })),
        )
            .into_response();
    }

    info!(
        "Received campaign generation request for: {}",
        request.business_info.business_name
    );

    let result = state
        .pipeline
        .generate(
            request.business_info,
            request.campaign_info,
            request.previous_performance,
        )
        .await;

    // A state-level error is a partial result, not a protocol failure; only
    // a misconfigured graph becomes a 500 here.
    let campaign_state = match result {
        Ok(campaign_state) => campaign_state,
        Err(e) => {
            error!("Campaign generation failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to generate campaign" })),
            )
                .into_response();
        }
    };

    let campaign = Campaign::from_state(campaign_state, request.user_id);
    if let Err(e) = state.store.save_campaign(campaign.clone()).await {
        error!("Failed to save campaign {}: {}", campaign.id, e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to save campaign" })),
        )
            .into_response();
    }

    (StatusCode::OK, Json(campaign)).into_response()
}

pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid campaign id" })),
            )
                .into_response()
        }
    };

    match state.store.get_campaign(id).await {
        Ok(Some(campaign)) => (StatusCode::OK, Json(campaign)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Campaign not found" })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to fetch campaign {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch campaign" })),
            )
                .into_response()
        }
    }
}

pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListCampaignsParams>,
) -> Response {
    let result = match params.user_id {
        Some(user_id) => {
            state
                .store
                .list_campaigns_for_user(&user_id, params.limit)
                .await
        }
        None => state.store.list_campaigns(params.limit, params.offset).await,
    };

    match result {
        Ok(campaigns) => (StatusCode::OK, Json(campaigns)).into_response(),
        Err(e) => {
            error!("Failed to list campaigns: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch campaigns" })),
            )
                .into_response()
        }
    }
}
