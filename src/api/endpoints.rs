//! # Endpoint Catalog
//!
//! Builders for every backend call the client makes. Destructive calls come
//! back wrapped in a [`Gated`] so they cannot be sent unconfirmed.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value, json};

use super::types::{InteractionLog, ModelKind, TrainRequest};
use crate::core::confirm::{Confirmation, DELETE_PHRASE, Gated};
use crate::core::request::{ActionRequest, ResponseFormat};

pub const LOG_INTERACTION: &str = "/api/log-interaction";
pub const TRAIN_MODELS: &str = "/api/ai/train/models";
pub const PREDICT_PERFORMANCE: &str = "/api/ai/predict/performance";
pub const LEARNING_STYLE: &str = "/api/ai/user/learning-style";
pub const LEARNING_STYLE_VISUALIZATION: &str = "/api/ai/user/learning-style/visualization";
pub const PREDICT_DISENGAGEMENT: &str = "/api/ai/predict/disengagement";
pub const EXPORT_USER_DATA: &str = "/api/export-user-data";
pub const CLEAR_LEARNING_HISTORY: &str = "/api/clear-learning-history";
pub const DELETE_ACCOUNT: &str = "/api/delete-account";

/// File name the export is saved under.
pub const EXPORT_FILENAME: &str = "my-learning-data.json";

/// Same shape as a browser's `Date.toISOString()`.
fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serializes a body struct into the payload map.
fn object(body: Value) -> Option<Map<String, Value>> {
    match body {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

pub fn log_interaction(
    content_id: &str,
    kind: &str,
    details: Map<String, Value>,
    at: DateTime<Utc>,
) -> ActionRequest {
    let log = InteractionLog {
        content_id: content_id.to_string(),
        kind: kind.to_string(),
        timestamp: iso_timestamp(at),
        details,
    };
    let body = serde_json::to_value(log).ok().and_then(object);
    ActionRequest::post(LOG_INTERACTION, body)
}

/// Retrains the given models. An empty list means all of them.
pub fn train_models(models: &[ModelKind]) -> ActionRequest {
    let models = if models.is_empty() {
        vec![ModelKind::All]
    } else {
        models.to_vec()
    };
    let body = serde_json::to_value(TrainRequest { models }).ok().and_then(object);
    ActionRequest::post(TRAIN_MODELS, body)
}

pub fn predict_performance() -> ActionRequest {
    ActionRequest::get(PREDICT_PERFORMANCE)
}

pub fn learning_style() -> ActionRequest {
    ActionRequest::get(LEARNING_STYLE)
}

pub fn learning_style_visualization() -> ActionRequest {
    ActionRequest::get(LEARNING_STYLE_VISUALIZATION)
}

pub fn predict_disengagement() -> ActionRequest {
    ActionRequest::get(PREDICT_DISENGAGEMENT)
}

pub fn export_user_data() -> ActionRequest {
    ActionRequest::get(EXPORT_USER_DATA).expecting(ResponseFormat::Binary)
}

pub fn clear_learning_history() -> Gated {
    Gated::new(
        Confirmation::yes_no(
            "Are you sure you want to clear your learning history? This action cannot be undone.",
        ),
        ActionRequest::post(CLEAR_LEARNING_HISTORY, None),
    )
}

pub fn delete_account() -> Gated {
    Gated::new(
        Confirmation::typed(
            format!(
                "This action will permanently delete your account and all associated data. \
                 This cannot be undone. Type \"{DELETE_PHRASE}\" to confirm: "
            ),
            DELETE_PHRASE,
        ),
        ActionRequest::post(DELETE_ACCOUNT, None),
    )
}

/// Details attached when the adapted view of a content item is opened.
pub fn adapted_view_details() -> Map<String, Value> {
    object(json!({ "is_adapted": true })).unwrap_or_default()
}
