use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::outcome::{ActionError, Payload};

/// Models the backend can retrain.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    All,
    Performance,
    Engagement,
    LearningStyle,
    ContentVectors,
}

/// Body of `POST /api/log-interaction`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InteractionLog {
    pub content_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
    pub details: Map<String, Value>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrainRequest {
    pub models: Vec<ModelKind>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TrainResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: BTreeMap<String, Value>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PerformancePrediction {
    pub predicted_performance: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub features_importance: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LearningStyleProfile {
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub style_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub enough_data: bool,
    #[serde(default)]
    pub description: String,
}

/// Rendered style chart. `visualization` is an image data URL.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StyleVisualization {
    pub visualization: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ContributingFactor {
    pub factor: String,
    pub description: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DisengagementPrediction {
    #[serde(default)]
    pub disengagement_probability: Option<f64>,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub contributing_factors: Vec<ContributingFactor>,
}

/// A prediction body. The backend answers 200 with an `error` field when it
/// cannot predict yet; that is a view state, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction<T> {
    Available(T),
    InsufficientData(String),
}

impl<T: DeserializeOwned> Prediction<T> {
    pub fn from_payload(payload: &Payload) -> Result<Self, ActionError> {
        let value = json_body(payload)?;
        if let Some(err) = value.get("error") {
            let reason = err.as_str().map(str::to_string).unwrap_or_else(|| err.to_string());
            return Ok(Prediction::InsufficientData(reason));
        }
        serde_json::from_value(value.clone())
            .map(Prediction::Available)
            .map_err(|e| ActionError::Payload(e.to_string()))
    }
}

/// Decodes a JSON payload into `T`.
pub fn parse<T: DeserializeOwned>(payload: &Payload) -> Result<T, ActionError> {
    serde_json::from_value(json_body(payload)?.clone()).map_err(|e| ActionError::Payload(e.to_string()))
}

fn json_body(payload: &Payload) -> Result<&Value, ActionError> {
    payload
        .as_json()
        .ok_or_else(|| ActionError::Payload("expected a JSON body, got binary".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_kind_serializes_snake_case() {
        let body = serde_json::to_value(TrainRequest {
            models: vec![ModelKind::LearningStyle, ModelKind::ContentVectors],
        })
        .unwrap();
        assert_eq!(body, json!({"models": ["learning_style", "content_vectors"]}));
    }

    #[test]
    fn test_interaction_log_renames_kind() {
        let log = InteractionLog {
            content_id: "12".into(),
            kind: "view_adapted_content".into(),
            timestamp: "2024-01-01T00:00:00.000Z".into(),
            details: Map::new(),
        };
        let v = serde_json::to_value(log).unwrap();
        assert_eq!(v["type"], "view_adapted_content");
        assert!(v.get("kind").is_none());
    }

    #[test]
    fn test_prediction_error_field_means_insufficient_data() {
        let payload = Payload::Json(json!({"error": "Could not generate prediction"}));
        let p = Prediction::<PerformancePrediction>::from_payload(&payload).unwrap();
        assert_eq!(p, Prediction::InsufficientData("Could not generate prediction".into()));
    }

    #[test]
    fn test_prediction_available() {
        let payload = Payload::Json(json!({"predicted_performance": 0.72, "confidence": 0.8}));
        match Prediction::<PerformancePrediction>::from_payload(&payload).unwrap() {
            Prediction::Available(p) => {
                assert_eq!(p.predicted_performance, 0.72);
                assert_eq!(p.confidence, Some(0.8));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_prediction_wrong_shape_is_payload_error() {
        let payload = Payload::Json(json!({"predicted_performance": "high"}));
        let err = Prediction::<PerformancePrediction>::from_payload(&payload).unwrap_err();
        assert!(matches!(err, ActionError::Payload(_)));
    }

    #[test]
    fn test_parse_rejects_binary() {
        let err = parse::<StatusResponse>(&Payload::Binary(vec![0u8; 4])).unwrap_err();
        assert!(matches!(err, ActionError::Payload(_)));
    }

    #[test]
    fn test_disengagement_defaults() {
        let d: DisengagementPrediction = parse(&Payload::Json(json!({"risk_level": "low"}))).unwrap();
        assert!(d.contributing_factors.is_empty());
        assert_eq!(d.disengagement_probability, None);
    }
}
