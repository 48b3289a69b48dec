//! # Insights
//!
//! Presentation rules applied to backend responses before they are shown.
//! Pure functions only: no I/O, no knowledge of the terminal or the CLI.
//!
//! - [`performance`]: level class and advice for a predicted score
//! - [`engagement`]: status for a disengagement risk level
//! - [`learning_style`]: display name and content emphasis for a style
//! - [`learning_path`]: node geometry for the path strip
//! - [`training`]: the cosmetic training progress animation
//! - [`text`]: console and dashboard wording for every response

pub mod engagement;
pub mod learning_path;
pub mod learning_style;
pub mod performance;
pub mod text;
pub mod training;
