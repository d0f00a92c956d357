use serde::{Deserialize, Serialize};

/// Who the campaign is for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    pub business_name: String,
    pub industry: String,
    pub target_audience: String,
}

/// What the campaign should achieve and how it should feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInfo {
    pub campaign_goal: String,
    pub platform: String,
    pub tone: String,
    pub visual_style: String,
}

/// The state threaded through the generation workflow.
///
/// The input fields are set once before the run; each step fills in exactly
/// one output field, or sets `error` and leaves the rest untouched. A state
/// with `error` set still carries whatever the earlier steps produced, so a
/// failed run yields a partial result rather than nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignState {
    pub business_info: BusinessInfo,
    pub campaign_info: CampaignInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_performance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_copy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    // Populated only once an image generation backend is wired in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeting_recommendations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CampaignState {
    pub fn new(
        business_info: BusinessInfo,
        campaign_info: CampaignInfo,
        previous_performance: Option<String>,
    ) -> Self {
        Self {
            business_info,
            campaign_info,
            previous_performance,
            ad_copy: None,
            image_prompt: None,
            image_url: None,
            targeting_recommendations: None,
            error: None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
