//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the dashboard,
//! and translates keyboard events into core::Action values.
//!
//! Each control gets its own [`AsyncActionController`]. Requests run on tokio
//! tasks; their hook calls come back over a channel as actions, so the
//! dashboard state is only ever touched from the loop below.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (a request in flight or training animating): polls every ~80ms.
//! - **Idle**: sleeps up to 500ms and only wakes for keys or resizes.

mod event;
mod hooks;
mod ui;

use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crate::api::{Transport, endpoints};
use crate::core::action::{Action, Effect, PanelId, update};
use crate::core::config::ResolvedConfig;
use crate::core::controller::AsyncActionController;
use crate::core::request::ActionRequest;
use crate::core::state::Dashboard;
use crate::insights::learning_path::PathProgress;
use crate::insights::training::TICK;
use crate::tui::event::poll_action;
use crate::tui::hooks::PanelHooks;

const BUSY_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

fn request_for(id: PanelId) -> ActionRequest {
    match id {
        PanelId::Performance => endpoints::predict_performance(),
        PanelId::LearningStyle => endpoints::learning_style(),
        PanelId::StyleChart => endpoints::learning_style_visualization(),
        PanelId::Engagement => endpoints::predict_disengagement(),
        PanelId::Training => endpoints::train_models(&[]),
    }
}

/// One controller per dashboard control.
struct Controllers {
    by_panel: HashMap<PanelId, Arc<AsyncActionController>>,
}

impl Controllers {
    fn new(transport: &Arc<dyn Transport>) -> Self {
        let ids = [
            PanelId::Performance,
            PanelId::LearningStyle,
            PanelId::StyleChart,
            PanelId::Engagement,
            PanelId::Training,
        ];
        let by_panel = ids
            .into_iter()
            .map(|id| {
                let label = format!("{id:?}");
                (id, Arc::new(AsyncActionController::new(label, Arc::clone(transport))))
            })
            .collect();
        Self { by_panel }
    }

    /// Spawns the requests an effect asks for. Returns false on `Effect::Quit`.
    fn dispatch(&self, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
        match effect {
            Effect::Quit => return false,
            Effect::None => {}
            Effect::Fetch(ids) => {
                for id in ids {
                    self.spawn(id, tx.clone());
                }
            }
            Effect::Train => self.spawn(PanelId::Training, tx.clone()),
        }
        true
    }

    fn spawn(&self, id: PanelId, tx: mpsc::Sender<Action>) {
        let Some(controller) = self.by_panel.get(&id).cloned() else {
            return;
        };
        tokio::spawn(async move {
            let mut hooks = PanelHooks::new(id, tx);
            let outcome = controller.trigger(request_for(id), &mut hooks).await;
            if outcome.is_ignored() {
                debug!("{}: already in flight, trigger ignored", controller.label());
            }
        });
    }
}

pub fn run(config: &ResolvedConfig, transport: Arc<dyn Transport>) -> std::io::Result<()> {
    let path = config
        .learning_path
        .as_deref()
        .map(PathProgress::parse)
        .unwrap_or_default();
    let mut app = Dashboard::new(config.base_url.clone(), path);
    let controllers = Controllers::new(&transport);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    info!("Starting dashboard against {}", config.base_url);
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &controllers, &tx, &rx);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut Dashboard,
    controllers: &Controllers,
    tx: &mpsc::Sender<Action>,
    rx: &mpsc::Receiver<Action>,
) -> std::io::Result<()> {
    // Load the panels straight away
    let mut pending = vec![Action::Refresh];
    let mut last_tick = Instant::now();

    loop {
        // Background results first, then keys, then the animation clock
        pending.extend(rx.try_iter());
        for action in pending.drain(..) {
            debug!("Event loop received: {:?}", action);
            let effect = update(app, action);
            if !controllers.dispatch(effect, tx) {
                return Ok(());
            }
        }

        terminal.draw(|f| ui::draw_ui(f, app))?;

        let timeout = if app.is_busy() { BUSY_POLL } else { IDLE_POLL };
        if let Some(action) = poll_action(timeout)? {
            pending.push(action);
        }

        if app.training.is_animating() && last_tick.elapsed() >= TICK {
            pending.push(Action::Tick);
            last_tick = Instant::now();
        }
    }
}
