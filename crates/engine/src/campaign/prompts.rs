//! Prompt templates for the generation steps, rendered with Tera from the
//! workflow state.

use lazy_static::lazy_static;
use tera::{Context, Tera};

use crate::campaign::CampaignState;
use crate::Result;

const AD_COPY_PROMPT: &str = "\
You are an expert marketing copywriter.
Generate engaging ad copy for the following business:

Business Name: {{ businessInfo.businessName }}
Industry: {{ businessInfo.industry }}
Target Audience: {{ businessInfo.targetAudience }}
Campaign Goal: {{ campaignInfo.campaignGoal }}
Platform: {{ campaignInfo.platform }}
Tone: {{ campaignInfo.tone }}

Generate 3 variations of ad copy that are compelling, concise, and aligned with the brand's voice.
Each ad copy should include a headline and body text, formatted cleanly.
Include a call-to-action that aligns with the campaign goal.
";

const IMAGE_PROMPT_PROMPT: &str = "\
You are an expert at creating prompts for AI image generators.
Create a detailed, descriptive prompt that would generate an engaging marketing image based on:

Business Name: {{ businessInfo.businessName }}
Industry: {{ businessInfo.industry }}
Target Audience: {{ businessInfo.targetAudience }}
Campaign Goal: {{ campaignInfo.campaignGoal }}
Platform: {{ campaignInfo.platform }}
Visual Style: {{ campaignInfo.visualStyle }}

The prompt should be detailed, specific, and designed to create a compelling marketing image.
Include details about composition, style, colors, mood, and what should be included in the image.
The prompt should be a single paragraph, ready to be fed into an image generation AI.
";

const TARGETING_PROMPT: &str = "\
You are an expert marketing strategist.
Based on the following business information, provide targeting recommendations for their marketing campaign:

Business Name: {{ businessInfo.businessName }}
Industry: {{ businessInfo.industry }}
Current Target Audience: {{ businessInfo.targetAudience }}
Campaign Goal: {{ campaignInfo.campaignGoal }}
Platform: {{ campaignInfo.platform }}
Previous Campaign Performance (if any): {{ previousPerformance | default(value=\"No previous performance data\") }}

Provide recommendations for:
1. Demographic targeting (age, gender, income, education, etc.)
2. Geographic targeting (locations to target)
3. Interest-based targeting (relevant interests, behaviors)
4. Optimal times to run the campaign
5. Budget allocation recommendations

Format your response in a clear, structured way.
";

lazy_static! {
    static ref PROMPTS: Tera = {
        let mut tera = Tera::default();
        tera.add_raw_template("ad_copy", AD_COPY_PROMPT).unwrap();
        tera.add_raw_template("image_prompt", IMAGE_PROMPT_PROMPT)
            .unwrap();
        tera.add_raw_template("targeting", TARGETING_PROMPT).unwrap();
        tera
    };
}

pub fn render_ad_copy_prompt(state: &CampaignState) -> Result<String> {
    render("ad_copy", state)
}

pub fn render_image_prompt_prompt(state: &CampaignState) -> Result<String> {
    render("image_prompt", state)
}

pub fn render_targeting_prompt(state: &CampaignState) -> Result<String> {
    render("targeting", state)
}

fn render(template: &str, state: &CampaignState) -> Result<String> {
    let context = Context::from_serialize(state)?;
    Ok(PROMPTS.render(template, &context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{BusinessInfo, CampaignInfo};

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

    #[test]
    fn ad_copy_prompt_includes_business_fields() {
        let prompt = render_ad_copy_prompt(&sample_state()).unwrap();
        assert!(prompt.contains("Business Name: Acme Coffee"));
        assert!(prompt.contains("Tone: friendly"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn image_prompt_uses_visual_style_not_tone() {
        let prompt = render_image_prompt_prompt(&sample_state()).unwrap();
        assert!(prompt.contains("Visual Style: bright and modern"));
        assert!(!prompt.contains("Tone:"));
    }

    #[test]
    fn targeting_prompt_defaults_missing_previous_performance() {
        let prompt = render_targeting_prompt(&sample_state()).unwrap();
        assert!(prompt.contains("No previous performance data"));

        let mut state = sample_state();
        state.previous_performance = Some("CTR 1.2% on last campaign".to_string());
        let prompt = render_targeting_prompt(&state).unwrap();
        assert!(prompt.contains("CTR 1.2% on last campaign"));
    }
}
