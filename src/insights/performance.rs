use crate::api::types::PerformancePrediction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl PerformanceLevel {
    /// Classifies a predicted score in `0.0..=1.0`.
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            PerformanceLevel::Excellent
        } else if score > 0.6 {
            PerformanceLevel::Good
        } else if score < 0.4 {
            PerformanceLevel::NeedsImprovement
        } else {
            PerformanceLevel::Average
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "excellent",
            PerformanceLevel::Good => "good",
            PerformanceLevel::Average => "average",
            PerformanceLevel::NeedsImprovement => "needs improvement",
        }
    }
}

pub fn percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Advice shown under the score, keyed on the rounded percentage.
pub fn action_message(percent: u8) -> &'static str {
    if percent >= 85 {
        "You're on track for excellent results! Consider exploring more advanced content."
    } else if percent >= 70 {
        "You're doing well! Focus on your recommended content to maintain progress."
    } else if percent >= 50 {
        "You're making progress. Spending more time with practice exercises could help boost your performance."
    } else {
        "You might benefit from revisiting fundamental concepts. Check out your recommended remedial content."
    }
}

/// Display-ready summary of a performance prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSummary {
    pub percent: u8,
    pub level: PerformanceLevel,
    pub message: &'static str,
}

impl From<&PerformancePrediction> for PerformanceSummary {
    fn from(p: &PerformancePrediction) -> Self {
        let percent = percent(p.predicted_performance);
        Self {
            percent,
            level: PerformanceLevel::from_score(p.predicted_performance),
            message: action_message(percent),
        }
    }
}
