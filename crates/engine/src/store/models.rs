use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::campaign::{BusinessInfo, CampaignInfo, CampaignState};

/// A finished campaign run as stored and returned to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub status: CampaignStatus,

    pub business_info: BusinessInfo,
    pub campaign_info: CampaignInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_performance: Option<String>,

    // Generated artifacts; a failed run keeps whatever was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_copy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeting_recommendations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Succeeded,
    Failed,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignStatus::Succeeded => write!(f, "succeeded"),
            CampaignStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "succeeded" => Ok(CampaignStatus::Succeeded),
            "failed" => Ok(CampaignStatus::Failed),
            other => Err(crate::Error::Internal(format!(
                "Unknown campaign status: {}",
                other
            ))),
        }
    }
}

impl Campaign {
    /// Builds a storable record from a finished workflow state.
    pub fn from_state(state: CampaignState, user_id: Option<String>) -> Self {
        let now = Utc::now();
        let status = if state.has_error() {
            CampaignStatus::Failed
        } else {
            CampaignStatus::Succeeded
        };

        Self {
            id: Uuid::new_v4(),
            user_id,
            status,
            business_info: state.business_info,
            campaign_info: state.campaign_info,
            previous_performance: state.previous_performance,
            ad_copy: state.ad_copy,
            image_prompt: state.image_prompt,
            image_url: state.image_url,
            targeting_recommendations: state.targeting_recommendations,
            error: state.error,
            created_at: now,
            updated_at: now,
        }
    }
}
