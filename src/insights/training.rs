//! Training progress animation.
//!
//! The backend gives no progress signal for training; this only animates the
//! bar after the request has been accepted. It eases towards 95%, then jumps
//! to 100% on the following tick. Steps never shrink below `MIN_STEP`, so the
//! plateau is actually reached.

use std::time::Duration;

pub const TICK: Duration = Duration::from_millis(300);

const PLATEAU: f64 = 95.0;
const MIN_STEP: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingProgress {
    percent: f64,
    status: &'static str,
}

impl Default for TrainingProgress {
    fn default() -> Self {
        Self {
            percent: 0.0,
            status: "Training in progress...",
        }
    }
}

impl TrainingProgress {
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn status(&self) -> &'static str {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }

    /// `"42% Complete"`.
    pub fn label(&self) -> String {
        format!("{}% Complete", self.percent.round() as u32)
    }

    /// Advances one tick. No-op once complete.
    pub fn tick(&mut self) {
        if self.is_complete() {
            return;
        }
        if self.percent < PLATEAU {
            let step = ((PLATEAU - self.percent) / 10.0).clamp(MIN_STEP, 10.0);
            self.percent = (self.percent + step).min(PLATEAU);
            if self.percent > 20.0 && self.percent < 22.0 {
                self.status = "Preparing training data...";
            } else if self.percent > 40.0 && self.percent < 42.0 {
                self.status = "Training model...";
            } else if self.percent > 70.0 && self.percent < 72.0 {
                self.status = "Evaluating model performance...";
            } else if self.percent > 90.0 {
                self.status = "Finalizing and saving model...";
            }
        } else {
            self.percent = 100.0;
            self.status = "Training complete!";
        }
    }
}
