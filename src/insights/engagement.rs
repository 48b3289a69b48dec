use crate::api::types::DisengagementPrediction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementStatus {
    Good,
    Warning,
    Danger,
}

impl EngagementStatus {
    /// Unknown risk levels read as good, same as `low`.
    pub fn from_risk_level(risk_level: &str) -> Self {
        match risk_level {
            "high" => EngagementStatus::Danger,
            "medium" => EngagementStatus::Warning,
            _ => EngagementStatus::Good,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EngagementStatus::Good => "Excellent engagement",
            EngagementStatus::Warning => "Moderate engagement",
            EngagementStatus::Danger => "At risk of disengagement",
        }
    }
}

/// `factor: description` lines, in server order.
pub fn suggestions(prediction: &DisengagementPrediction) -> Vec<String> {
    prediction
        .contributing_factors
        .iter()
        .map(|f| format!("{}: {}", f.factor, f.description))
        .collect()
}
