//! Parse-then-validate step for automation requests.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::TRACING_TARGET_VALIDATION;
use crate::request::{AutomationRequest, DurationPreference, RawAutomationRequest, VoiceProfile};

/// Fields of an automation request, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[derive(AsRefStr, Display, EnumIter, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RequestField {
    ChannelName,
    Topic,
    Objective,
    DurationPreference,
    CallToAction,
    VoiceProfile,
    TargetAudience,
    Language,
    ReferenceLinks,
}

impl RequestField {
    /// Returns whether the field must be present and non-blank.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::ReferenceLinks)
    }

    /// Iterates the required fields in declaration order.
    pub fn required() -> impl Iterator<Item = Self> {
        Self::iter().filter(|field| field.is_required())
    }

    /// Returns the accepted values of an enumerated field.
    pub fn allowed_values(self) -> Option<Vec<&'static str>> {
        match self {
            Self::DurationPreference => Some(DurationPreference::iter().map(Into::into).collect()),
            Self::VoiceProfile => Some(VoiceProfile::iter().map(Into::into).collect()),
            _ => None,
        }
    }

    fn raw_value(self, raw: &RawAutomationRequest) -> Option<&Value> {
        match self {
            Self::ChannelName => raw.channel_name.as_ref(),
            Self::Topic => raw.topic.as_ref(),
            Self::Objective => raw.objective.as_ref(),
            Self::DurationPreference => raw.duration_preference.as_ref(),
            Self::CallToAction => raw.call_to_action.as_ref(),
            Self::VoiceProfile => raw.voice_profile.as_ref(),
            Self::TargetAudience => raw.target_audience.as_ref(),
            Self::Language => raw.language.as_ref(),
            Self::ReferenceLinks => raw.reference_links.as_ref(),
        }
    }
}

/// Every problem found in a request, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Required fields that are absent, falsy or blank.
    pub missing: Vec<RequestField>,
    /// Fields that are present but hold an unsupported value.
    pub invalid: Vec<RequestField>,
}

impl ValidationError {
    /// Creates an error for the given missing fields.
    pub fn missing(fields: Vec<RequestField>) -> Self {
        Self {
            missing: fields,
            invalid: Vec::new(),
        }
    }

    /// Returns whether no problem was recorded.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// Returns every offending field, missing ones first.
    pub fn fields(&self) -> impl Iterator<Item = RequestField> + '_ {
        self.missing.iter().chain(self.invalid.iter()).copied()
    }
}

fn join(fields: &[RequestField]) -> String {
    fields
        .iter()
        .map(RequestField::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.missing.as_slice(), self.invalid.as_slice()) {
            ([], []) => f.write_str("Validation failed"),
            (missing, []) => write!(f, "Missing required fields: {}", join(missing)),
            ([], invalid) => write!(f, "Invalid values for fields: {}", join(invalid)),
            (missing, invalid) => write!(
                f,
                "Missing required fields: {}. Invalid values for fields: {}",
                join(missing),
                join(invalid)
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Renders a loosely-typed value the way a form field would be read.
///
/// `null`, `false`, `0` and empty strings yield `None`, matching a
/// truthiness check on the field.
fn string_form(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_owned()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| string_form(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some("[object Object]".to_owned()),
    }
}

/// Trims and filters reference links, preserving order.
///
/// A single string is one link per line. Scalar array entries use their
/// string form; nested arrays, objects and any other top-level shape
/// contribute nothing.
fn normalize_links(value: Option<&Value>) -> Vec<String> {
    let entries: Vec<String> = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(text)) => text.lines().map(str::to_owned).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_array() && !item.is_object())
            .filter_map(string_form)
            .collect(),
        Some(other) => {
            tracing::debug!(
                target: TRACING_TARGET_VALIDATION,
                value = %other,
                "ignoring reference links that are neither text nor a list"
            );
            Vec::new()
        }
    };

    entries
        .iter()
        .map(|link| link.trim())
        .filter(|link| !link.is_empty())
        .map(str::to_owned)
        .collect()
}

pub(crate) fn validate(raw: RawAutomationRequest) -> Result<AutomationRequest, ValidationError> {
    let mut error = ValidationError::default();

    let mut text = |field: RequestField| -> String {
        let value = field
            .raw_value(&raw)
            .and_then(string_form)
            .map(|s| s.trim().to_owned())
            .unwrap_or_default();
        if value.is_empty() {
            error.missing.push(field);
        }
        value
    };

    let channel_name = text(RequestField::ChannelName);
    let topic = text(RequestField::Topic);
    let objective = text(RequestField::Objective);
    let duration_preference = text(RequestField::DurationPreference);
    let call_to_action = text(RequestField::CallToAction);
    let voice_profile = text(RequestField::VoiceProfile);
    let target_audience = text(RequestField::TargetAudience);
    let language = text(RequestField::Language);

    let duration_preference = parse_choice::<DurationPreference>(
        RequestField::DurationPreference,
        &duration_preference,
        &mut error,
    );
    let voice_profile =
        parse_choice::<VoiceProfile>(RequestField::VoiceProfile, &voice_profile, &mut error);

    let reference_links = normalize_links(raw.reference_links.as_ref());

    match (duration_preference, voice_profile) {
        (Some(duration_preference), Some(voice_profile)) if error.is_empty() =>
        {
            Ok(AutomationRequest {
                channel_name,
                topic,
                objective,
                duration_preference,
                call_to_action,
                voice_profile,
                target_audience,
                language,
                reference_links,
            })
        }
        _ => {
            tracing::debug!(
                target: TRACING_TARGET_VALIDATION,
                missing = ?error.missing,
                invalid = ?error.invalid,
                "automation request rejected"
            );
            Err(error)
        }
    }
}

/// Parses an enumerated field; blank values were already reported missing.
fn parse_choice<T: FromStr>(
    field: RequestField,
    value: &str,
    error: &mut ValidationError,
) -> Option<T> {
    if value.is_empty() {
        return None;
    }

    let parsed = T::from_str(value).ok();
    if parsed.is_none() {
        error.invalid.push(field);
    }
    parsed
}
