//! # Actions
//!
//! Everything that can happen on the dashboard becomes an `Action`.
//! User presses `r`? That's `Action::Refresh`.
//! A controller calls `on_success`? That's `Action::Panel(id, PanelEvent::Succeeded(..))`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state and returns an [`Effect`] for the adapter to carry out. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;
use serde_json::Value;

use crate::core::outcome::{FailureKind, Payload};
use crate::core::state::{Dashboard, PanelView};
use crate::insights::text::{self, ENGAGEMENT, LEARNING_STYLE, PERFORMANCE, Rendered, STYLE_CHART, TRAIN, Wording};
use crate::insights::training::TrainingProgress;

/// The independently triggered controls on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Performance,
    LearningStyle,
    StyleChart,
    Engagement,
    Training,
}

impl PanelId {
    /// The panels a refresh reloads.
    pub const PREDICTIONS: [PanelId; 3] = [PanelId::Performance, PanelId::LearningStyle, PanelId::Engagement];

    pub fn wording(&self) -> Wording {
        match self {
            PanelId::Performance => PERFORMANCE,
            PanelId::LearningStyle => LEARNING_STYLE,
            PanelId::StyleChart => STYLE_CHART,
            PanelId::Engagement => ENGAGEMENT,
            PanelId::Training => TRAIN,
        }
    }
}

/// A presentation hook call, relayed from a background task.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Started,
    Succeeded(Payload),
    /// Kind, message and the JSON error body, if the reply had one.
    Failed(FailureKind, String, Option<Value>),
    Settled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Refresh,
    Train,
    /// Animation clock.
    Tick,
    Quit,
    Panel(PanelId, PanelEvent),
}

/// Work the adapter must do after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Fetch(Vec<PanelId>),
    Train,
}

pub fn update(app: &mut Dashboard, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::Refresh => {
            app.status_message = String::from("Refreshing...");
            Effect::Fetch(PanelId::PREDICTIONS.to_vec())
        }
        Action::Train => Effect::Train,
        Action::Tick => {
            if let Some(progress) = app.training.progress.as_mut()
                && !progress.is_complete()
            {
                progress.tick();
                app.training.status = progress.status().to_string();
            }
            Effect::None
        }
        Action::Panel(PanelId::Training, event) => update_training(app, event),
        Action::Panel(id, event) => update_panel(app, id, event),
    }
}

fn update_training(app: &mut Dashboard, event: PanelEvent) -> Effect {
    let training = &mut app.training;
    match event {
        PanelEvent::Started => {
            training.enabled = false;
            training.progress = None;
            training.status = TRAIN.busy.to_string();
        }
        PanelEvent::Succeeded(_) => {
            training.progress = Some(TrainingProgress::default());
        }
        PanelEvent::Failed(_, message, _) => {
            training.status = text::failure_line(TRAIN, &message);
        }
        PanelEvent::Settled => {
            training.enabled = true;
        }
    }
    Effect::None
}

fn update_panel(app: &mut Dashboard, id: PanelId, event: PanelEvent) -> Effect {
    let wording = id.wording();
    let mut effect = Effect::None;

    let next = match event {
        PanelEvent::Started if id == PanelId::StyleChart => return Effect::None,
        PanelEvent::Started => PanelView::Loading(wording.busy),
        PanelEvent::Succeeded(payload) => {
            let (rendered, chart) = render(id, &payload);
            if chart {
                effect = Effect::Fetch(vec![PanelId::StyleChart]);
            }
            match rendered {
                Ok(lines) => PanelView::Ready(lines),
                Err(message) => PanelView::Failed(text::failure_line(wording, &message)),
            }
        }
        PanelEvent::Failed(kind, message, body) => {
            debug!("{:?} failed ({:?}): {}", id, kind, message);
            match text::not_enough_data(wording, kind, body.as_ref()) {
                Some(lines) => PanelView::Ready(lines),
                None => PanelView::Failed(text::failure_line(wording, &message)),
            }
        }
        PanelEvent::Settled => {
            // A settle with the panel still loading means the task was cut short.
            if panel_mut(app, id).is_some_and(|p| p.is_loading()) {
                PanelView::Empty
            } else {
                if id != PanelId::StyleChart && !app.is_busy() {
                    app.status_message = String::from("Up to date.");
                }
                return Effect::None;
            }
        }
    };

    if id == PanelId::StyleChart {
        // The chart adds a line to the style panel instead of owning one.
        let line = match next {
            PanelView::Ready(lines) => lines,
            PanelView::Failed(line) => vec![line],
            _ => Vec::new(),
        };
        if let PanelView::Ready(existing) = &mut app.learning_style {
            existing.extend(line);
        }
    } else if let Some(panel) = panel_mut(app, id) {
        *panel = next;
    }
    effect
}

/// Renders a payload for `id`. The flag asks for the style chart follow-up.
fn render(id: PanelId, payload: &Payload) -> (Rendered, bool) {
    match id {
        PanelId::Performance => (text::performance(payload), false),
        PanelId::Engagement => (text::engagement(payload), false),
        PanelId::StyleChart => (text::style_visualization(payload), false),
        PanelId::Training => (text::training(payload), false),
        PanelId::LearningStyle => match text::learning_style(payload) {
            Ok((profile, lines)) => (Ok(lines), profile.is_some()),
            Err(e) => (Err(e), false),
        },
    }
}

fn panel_mut(app: &mut Dashboard, id: PanelId) -> Option<&mut PanelView> {
    match id {
        PanelId::Performance => Some(&mut app.performance),
        PanelId::LearningStyle => Some(&mut app.learning_style),
        PanelId::Engagement => Some(&mut app.engagement),
        PanelId::StyleChart | PanelId::Training => None,
    }
}
