//! Automation result types.

use serde::{Deserialize, Serialize};

/// Generated production material for one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AutomationResult {
    /// Master prompt for the LLM node.
    pub prompt: String,
    /// Narration script split into scenes.
    pub script: String,
    /// Text-to-speech guidance.
    pub voice_direction: String,
    /// How the n8n workflow routes the generated assets.
    pub workflow_summary: String,
    /// Recommended tools and resources, in display order.
    pub assets: Vec<RecommendedAsset>,
}

/// A labelled link to a recommended tool or resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct RecommendedAsset {
    pub label: String,
    pub url: String,
}

impl RecommendedAsset {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}
