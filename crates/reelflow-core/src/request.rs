//! Automation request types.
//!
//! The HTTP layer only ever deserializes [`RawAutomationRequest`]. The only
//! way to obtain an [`AutomationRequest`] is [`RawAutomationRequest::validate`],
//! so every value of that type satisfies the required-field invariants.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::validation::{self, ValidationError};

/// Target runtime of the produced video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DurationPreference {
    /// Shorts and reels.
    Short,
    /// Standard explainer.
    Mid,
    /// Long-form deep dive.
    Long,
}

impl DurationPreference {
    /// Returns the runtime window the script should be written for.
    #[must_use]
    pub const fn runtime(self) -> &'static str {
        match self {
            Self::Short => "45-60 seconds",
            Self::Mid => "4-6 minutes",
            Self::Long => "10-12 minutes",
        }
    }

    /// Returns how many scenes the script is split into.
    #[must_use]
    pub const fn scene_count(self) -> usize {
        match self {
            Self::Short => 3,
            Self::Mid => 5,
            Self::Long => 8,
        }
    }
}

/// Narration voice used for text-to-speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoiceProfile {
    /// Friendly guide.
    Friendly,
    /// Authoritative expert.
    Authoritative,
    /// Enthusiastic storyteller.
    Enthusiastic,
    /// Calm documentary.
    Calm,
}

impl VoiceProfile {
    /// Returns the human-readable persona name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Friendly => "Friendly guide",
            Self::Authoritative => "Authoritative expert",
            Self::Enthusiastic => "Enthusiastic storyteller",
            Self::Calm => "Calm documentary",
        }
    }

    /// Returns the delivery guidance handed to the text-to-speech step.
    #[must_use]
    pub const fn delivery(self) -> &'static str {
        match self {
            Self::Friendly => "warm, conversational pacing with light smiles in the voice",
            Self::Authoritative => "measured pacing, confident low register, crisp consonants",
            Self::Enthusiastic => "energetic pacing, rising intonation on key reveals",
            Self::Calm => "slow, even pacing with generous pauses between ideas",
        }
    }
}

/// Untrusted automation request as received from the caller.
///
/// Every field is an arbitrary JSON value so that malformed bodies reach the
/// validator and are reported field by field instead of failing
/// deserialization on the first problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RawAutomationRequest {
    #[serde(default)]
    pub channel_name: Option<Value>,
    #[serde(default)]
    pub topic: Option<Value>,
    #[serde(default)]
    pub objective: Option<Value>,
    #[serde(default)]
    pub duration_preference: Option<Value>,
    #[serde(default)]
    pub call_to_action: Option<Value>,
    #[serde(default)]
    pub voice_profile: Option<Value>,
    #[serde(default)]
    pub target_audience: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
    #[serde(default)]
    pub reference_links: Option<Value>,
}

impl RawAutomationRequest {
    /// Validates the request and produces a strongly-typed [`AutomationRequest`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every missing or invalid field.
    pub fn validate(self) -> Result<AutomationRequest, ValidationError> {
        validation::validate(self)
    }
}

/// Validated automation request.
///
/// Serializes to the payload delivered to the n8n webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AutomationRequest {
    pub(crate) channel_name: String,
    pub(crate) topic: String,
    pub(crate) objective: String,
    pub(crate) duration_preference: DurationPreference,
    pub(crate) call_to_action: String,
    pub(crate) voice_profile: VoiceProfile,
    pub(crate) target_audience: String,
    pub(crate) language: String,
    pub(crate) reference_links: Vec<String>,
}

impl AutomationRequest {
    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn duration_preference(&self) -> DurationPreference {
        self.duration_preference
    }

    pub fn call_to_action(&self) -> &str {
        &self.call_to_action
    }

    pub fn voice_profile(&self) -> VoiceProfile {
        self.voice_profile
    }

    pub fn target_audience(&self) -> &str {
        &self.target_audience
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the normalized reference links, in caller order.
    pub fn reference_links(&self) -> &[String] {
        &self.reference_links
    }

    /// Returns the reference links split into URL and note.
    pub fn references(&self) -> impl Iterator<Item = ReferenceLink> + '_ {
        self.reference_links.iter().map(|link| ReferenceLink::parse(link))
    }
}

/// A reference link entry, either a bare URL or `URL | note`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ReferenceLink {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ReferenceLink {
    /// Splits an entry at the first `|`; empty notes are dropped.
    pub fn parse(entry: &str) -> Self {
        match entry.split_once('|') {
            Some((url, note)) => {
                let note = note.trim();
                Self {
                    url: url.trim().to_owned(),
                    note: (!note.is_empty()).then(|| note.to_owned()),
                }
            }
            None => Self {
                url: entry.trim().to_owned(),
                note: None,
            },
        }
    }
}
