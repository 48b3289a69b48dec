//! # Dashboard State
//!
//! Everything the dashboard shows, in one place. Domain data only; terminal
//! concerns live in the `tui` module.
//!
//! ```text
//! Dashboard
//! ├── base_url: String             // backend shown in the title
//! ├── performance: PanelView       // AI Performance Prediction
//! ├── learning_style: PanelView    // Your Learning Style Profile (+ chart line)
//! ├── engagement: PanelView        // Learning Engagement Insights
//! ├── training: TrainingView       // train control + cosmetic progress
//! ├── path: PathProgress           // learning path strip
//! └── status_message: String       // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::insights::learning_path::PathProgress;
use crate::insights::training::TrainingProgress;

/// What a prediction panel currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelView {
    #[default]
    Empty,
    Loading(&'static str),
    Ready(Vec<String>),
    Failed(String),
}

impl PanelView {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelView::Loading(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingView {
    /// Whether the train control accepts input.
    pub enabled: bool,
    pub status: String,
    /// Set once the train request has been accepted.
    pub progress: Option<TrainingProgress>,
}

impl Default for TrainingView {
    fn default() -> Self {
        Self {
            enabled: true,
            status: String::from("Press t to retrain all models."),
            progress: None,
        }
    }
}

impl TrainingView {
    pub fn is_animating(&self) -> bool {
        self.progress.as_ref().is_some_and(|p| !p.is_complete())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub base_url: String,
    pub performance: PanelView,
    pub learning_style: PanelView,
    pub engagement: PanelView,
    pub training: TrainingView,
    pub path: PathProgress,
    pub status_message: String,
}

impl Dashboard {
    pub fn new(base_url: String, path: PathProgress) -> Self {
        Self {
            base_url,
            performance: PanelView::Empty,
            learning_style: PanelView::Empty,
            engagement: PanelView::Empty,
            training: TrainingView::default(),
            path,
            status_message: String::from("Press r to refresh."),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.performance.is_loading()
            || self.learning_style.is_loading()
            || self.engagement.is_loading()
            || !self.training.enabled
            || self.training.is_animating()
    }
}
