//! Text renderings of backend responses, shared by the command line and the
//! dashboard.
//!
//! Renderers return `Err(message)` when the body is readable but cannot be
//! presented; callers report that like any other failure.

use serde_json::Value;

use crate::api::types::{
    DisengagementPrediction, LearningStyleProfile, PerformancePrediction, Prediction, StatusResponse,
    StyleVisualization, TrainResponse, parse,
};
use crate::core::outcome::{FailureKind, Payload};
use super::engagement::{EngagementStatus, suggestions};
use super::learning_style::{display_name, emphasis};
use super::performance::PerformanceSummary;

/// Wording for one action: what to show while busy and on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wording {
    pub busy: &'static str,
    pub failure: &'static str,
    /// Lines for a prediction the backend cannot make yet. Empty for actions
    /// without such a state.
    pub not_enough_data: &'static [&'static str],
}

pub const PERFORMANCE: Wording = Wording {
    busy: "Loading AI prediction...",
    failure: "Unable to load prediction at this time.",
    not_enough_data: &[
        "Not enough data to make a prediction yet.",
        "Continue learning to get AI-powered insights!",
    ],
};
pub const LEARNING_STYLE: Wording = Wording {
    busy: "Analyzing your learning patterns...",
    failure: "Unable to analyze learning style at this time.",
    not_enough_data: &[],
};
pub const STYLE_CHART: Wording = Wording {
    busy: "Rendering style chart...",
    failure: "Unable to load the style chart at this time.",
    not_enough_data: &[],
};
pub const ENGAGEMENT: Wording = Wording {
    busy: "Analyzing your engagement patterns...",
    failure: "Unable to analyze engagement at this time.",
    not_enough_data: &["Not enough data to analyze engagement patterns yet."],
};
pub const TRAIN: Wording = Wording {
    busy: "Training in progress...",
    failure: "Error: Failed to start training.",
    not_enough_data: &[],
};
pub const EXPORT: Wording = Wording {
    busy: "Preparing export...",
    failure: "Failed to export data. Please try again later.",
    not_enough_data: &[],
};
pub const CLEAR_HISTORY: Wording = Wording {
    busy: "Clearing...",
    failure: "Failed to clear history. Please try again later.",
    not_enough_data: &[],
};
pub const DELETE_ACCOUNT: Wording = Wording {
    busy: "Deleting...",
    failure: "Failed to delete account. Please try again later.",
    not_enough_data: &[],
};

/// Status the prediction endpoints answer with when they have too little
/// history, along with a JSON body carrying an `error` field.
pub const NOT_ENOUGH_DATA_STATUS: u16 = 500;

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|l| l.to_string()).collect()
}

/// Recognises a prediction endpoint's "not enough data" reply among failures.
///
/// Returns the lines to show in place of a failure, or `None` when `kind` and
/// `body` describe a real failure (or `wording` has no such state).
pub fn not_enough_data(wording: Wording, kind: FailureKind, body: Option<&Value>) -> Option<Vec<String>> {
    if wording.not_enough_data.is_empty() || kind != FailureKind::HttpError(NOT_ENOUGH_DATA_STATUS) {
        return None;
    }
    body?.get("error").filter(|e| !e.is_null())?;
    Some(lines(wording.not_enough_data))
}

/// `"<failure> (<detail>)"`, the line shown when an action fails.
pub fn failure_line(wording: Wording, detail: &str) -> String {
    format!("{} ({detail})", wording.failure)
}

pub type Rendered = Result<Vec<String>, String>;

pub fn performance(payload: &Payload) -> Rendered {
    match Prediction::<PerformancePrediction>::from_payload(payload).map_err(|e| e.to_string())? {
        Prediction::InsufficientData(_) => Ok(lines(PERFORMANCE.not_enough_data)),
        Prediction::Available(p) => {
            let summary = PerformanceSummary::from(&p);
            Ok(vec![
                format!("Predicted performance: {}% ({})", summary.percent, summary.level.label()),
                summary.message.to_string(),
            ])
        }
    }
}

/// Returns the profile alongside its lines so the caller can decide on the
/// follow-up chart request.
pub fn learning_style(payload: &Payload) -> Result<(Option<LearningStyleProfile>, Vec<String>), String> {
    let profile: LearningStyleProfile = match Prediction::from_payload(payload).map_err(|e| e.to_string())? {
        Prediction::Available(p) => p,
        Prediction::InsufficientData(_) => return Ok((None, not_enough_style_data())),
    };
    if !profile.enough_data {
        return Ok((None, not_enough_style_data()));
    }
    let lines = vec![
        display_name(&profile.style),
        profile.description.clone(),
        format!(
            "Based on your learning style, we'll emphasize {} in your learning materials.",
            emphasis(&profile.style)
        ),
    ];
    Ok((Some(profile), lines))
}

fn not_enough_style_data() -> Vec<String> {
    vec![
        "We're still learning about your learning style preferences.".to_string(),
        "Continue interacting with different types of content for better personalization.".to_string(),
    ]
}

pub fn style_visualization(payload: &Payload) -> Rendered {
    let viz: StyleVisualization = parse(payload).map_err(|e| e.to_string())?;
    let kind = viz
        .visualization
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("unknown");
    Ok(vec![format!("Style chart: {} ({} characters)", kind, viz.visualization.len())])
}

pub fn engagement(payload: &Payload) -> Rendered {
    let prediction = match Prediction::<DisengagementPrediction>::from_payload(payload).map_err(|e| e.to_string())? {
        Prediction::InsufficientData(_) => return Ok(lines(ENGAGEMENT.not_enough_data)),
        Prediction::Available(p) => p,
    };
    let status = EngagementStatus::from_risk_level(&prediction.risk_level);
    let mut lines = vec![status.message().to_string()];
    let tips = suggestions(&prediction);
    if !tips.is_empty() {
        lines.push("Suggestions for Improvement".to_string());
        lines.extend(tips.into_iter().map(|t| format!("  - {t}")));
    }
    Ok(lines)
}

pub fn training(payload: &Payload) -> Rendered {
    let response: TrainResponse = parse(payload).map_err(|e| e.to_string())?;
    let mut lines = vec!["Training request accepted.".to_string()];
    lines.extend(response.results.iter().map(|(model, result)| format!("  {model}: {result}")));
    Ok(lines)
}

pub fn history_cleared(payload: &Payload) -> Rendered {
    parse::<StatusResponse>(payload).map_err(|e| e.to_string())?;
    Ok(vec!["Your learning history has been cleared successfully.".to_string()])
}

pub fn account_deleted(payload: &Payload) -> Rendered {
    parse::<StatusResponse>(payload).map_err(|e| e.to_string())?;
    Ok(vec!["Your account has been deleted successfully.".to_string()])
}
