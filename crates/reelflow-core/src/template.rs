//! Deterministic text templates used when no automation webhook is configured.
//!
//! Every function here is a pure function of the [`AutomationRequest`]: no
//! clock, no randomness, no I/O. Identical input renders byte-identical text.

use std::fmt::Write;

use crate::{AutomationRequest, AutomationResult, RecommendedAsset};

/// Provider homepages suggested with every mock result.
const RECOMMENDED_ASSETS: [(&str, &str); 5] = [
    ("OpenAI (script generation)", "https://openai.com"),
    ("ElevenLabs (voice synthesis)", "https://elevenlabs.io"),
    ("Runway (video generation)", "https://runwayml.com"),
    ("Pika (shot variations)", "https://pika.art"),
    ("n8n (workflow automation)", "https://n8n.io"),
];

/// Pipeline stages of the reference n8n workflow, in execution order.
const WORKFLOW_STAGES: [&str; 7] = [
    "Webhook trigger receives this payload",
    "LLM prompt builder drafts narration and shot list",
    "Text-to-speech branch renders the voiceover",
    "Video generation branch renders scenes in sync with voice cadence",
    "Assets merge stores scenes, captions and voiceover",
    "YouTube upload publishes a draft with metadata",
    "Team notification shares links and the QA checklist",
];

/// Renders the complete mock result.
pub fn render(request: &AutomationRequest) -> AutomationResult {
    AutomationResult {
        prompt: prompt(request),
        script: script(request),
        voice_direction: voice_direction(request),
        workflow_summary: workflow_summary(request),
        assets: assets(),
    }
}

/// Renders the master prompt for the LLM node.
pub fn prompt(request: &AutomationRequest) -> String {
    let duration = request.duration_preference();
    let mut prompt = format!(
        "You are the lead scriptwriter for the YouTube channel \"{channel}\".\n\
         Write a {runtime} video in {language} about: {topic}.\n\
         Objective: {objective}.\n\
         Audience: {audience}.\n\
         Narrator persona: {persona}.\n\
         Structure the script in {scenes} scenes, each with narration, on-screen text and a shot prompt.\n\
         Close with this call to action: \"{cta}\"",
        channel = request.channel_name(),
        runtime = duration.runtime(),
        language = request.language(),
        topic = request.topic(),
        objective = request.objective(),
        audience = request.target_audience(),
        persona = request.voice_profile().label(),
        scenes = duration.scene_count(),
        cta = request.call_to_action(),
    );

    if !request.reference_links().is_empty() {
        prompt.push_str("\nGround the script in these references:");
        for reference in request.references() {
            match reference.note {
                Some(note) => {
                    let _ = write!(prompt, "\n- {} ({note})", reference.url);
                }
                None => {
                    let _ = write!(prompt, "\n- {}", reference.url);
                }
            }
        }
    }

    prompt
}

/// Renders the scene-by-scene narration outline.
pub fn script(request: &AutomationRequest) -> String {
    let scenes = request.duration_preference().scene_count();
    let mut script = format!(
        "[Hook] {channel} here. Ever wondered {topic}? Stay with us.",
        channel = request.channel_name(),
        topic = lowercase_first(request.topic()),
    );

    for scene in 1..=scenes {
        let beat = match scene {
            1 => format!("Why this matters to {}", request.target_audience()),
            n if n == scenes => format!("How this helps you {}", lowercase_first(request.objective())),
            n => format!("Key insight {} on {}", n - 1, request.topic()),
        };
        let _ = write!(script, "\n[Scene {scene}] {beat}.");
    }

    let _ = write!(script, "\n[Outro] {}", request.call_to_action());
    script
}

/// Renders guidance for the text-to-speech step.
pub fn voice_direction(request: &AutomationRequest) -> String {
    let voice = request.voice_profile();
    format!(
        "Voice profile: {label} ({profile}). Deliver in {language} with {delivery}. \
         Speak to {audience}; land the call to action slowly and clearly.",
        label = voice.label(),
        profile = voice,
        language = request.language(),
        delivery = voice.delivery(),
        audience = request.target_audience(),
    )
}

/// Renders a summary of how the n8n workflow handles the request.
pub fn workflow_summary(request: &AutomationRequest) -> String {
    let mut summary = format!(
        "Workflow for \"{channel}\" ({duration}, {runtime}):",
        channel = request.channel_name(),
        duration = request.duration_preference(),
        runtime = request.duration_preference().runtime(),
    );

    for (index, stage) in WORKFLOW_STAGES.iter().enumerate() {
        let _ = write!(summary, "\n{}. {stage}", index + 1);
    }

    let _ = write!(
        summary,
        "\nReference links attached: {}.",
        request.reference_links().len()
    );
    summary
}

/// Returns the fixed list of recommended provider homepages.
pub fn assets() -> Vec<RecommendedAsset> {
    RECOMMENDED_ASSETS
        .iter()
        .map(|(label, url)| RecommendedAsset::new(*label, *url))
        .collect()
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
