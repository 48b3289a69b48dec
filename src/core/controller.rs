//! # Async Action Controller
//!
//! Runs one user-triggered request at a time and drives the view through
//! [`PresentationHooks`]:
//!
//! ```text
//! trigger() ── Idle? ──no──→ Ignored (no hooks, no request)
//!                │
//!               yes
//!                ▼
//!   InFlight, on_start()
//!                │  transport.execute().await
//!        ┌───────┴────────┐
//!        ▼                ▼
//!   Succeeded         Failed
//!   on_success()      on_failure()
//!        └───────┬────────┘
//!                ▼
//!      on_settle(), Idle
//! ```
//!
//! The settle step lives in a drop guard, so it also runs when the trigger
//! future is dropped mid-flight or a hook panics.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::api::Transport;
use crate::core::outcome::{ActionResult, ActionState, FailureKind, Payload};
use crate::core::request::ActionRequest;

/// The view side of an action. Each control supplies its own implementation.
pub trait PresentationHooks: Send {
    /// Disable the control and show a loading indicator.
    fn on_start(&mut self);

    fn on_success(&mut self, payload: &Payload);

    /// `body` is the JSON error body of a non-2xx reply, if it had one.
    fn on_failure(&mut self, kind: FailureKind, message: &str, body: Option<&Value>);

    /// Re-enable the control and clear the loading indicator.
    /// Called exactly once per accepted trigger.
    fn on_settle(&mut self);
}

/// What happened to a call to [`AsyncActionController::trigger`].
#[derive(Debug)]
pub enum Triggered {
    /// The controller was busy. Nothing was sent.
    Ignored,
    /// The request ran and the hooks have been called.
    Settled(ActionResult),
}

impl Triggered {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Triggered::Ignored)
    }

    pub fn into_result(self) -> Option<ActionResult> {
        match self {
            Triggered::Ignored => None,
            Triggered::Settled(result) => Some(result),
        }
    }
}

fn lock(state: &Mutex<ActionState>) -> MutexGuard<'_, ActionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct AsyncActionController {
    label: String,
    transport: Arc<dyn Transport>,
    state: Mutex<ActionState>,
}

impl AsyncActionController {
    pub fn new(label: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            label: label.into(),
            transport,
            state: Mutex::new(ActionState::Idle),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> ActionState {
        *lock(&self.state)
    }

    /// Claims the controller. Check and transition happen under one lock.
    fn begin(&self) -> bool {
        let mut state = lock(&self.state);
        if *state != ActionState::Idle {
            return false;
        }
        *state = ActionState::InFlight;
        true
    }

    fn transition(&self, next: ActionState) {
        debug!("{}: {:?} -> {:?}", self.label, self.state(), next);
        *lock(&self.state) = next;
    }

    /// Runs `request` unless an earlier one is still in flight.
    pub async fn trigger(
        &self,
        request: ActionRequest,
        hooks: &mut dyn PresentationHooks,
    ) -> Triggered {
        if !self.begin() {
            debug!("{}: ignoring {} while busy", self.label, request);
            return Triggered::Ignored;
        }

        info!("{}: [{}] {} via {}", self.label, request.id(), request, self.transport.name());
        let mut settlement = Settlement {
            state: &self.state,
            hooks,
        };
        settlement.hooks.on_start();

        let result = self.transport.execute(&request).await;
        match &result {
            Ok(payload) => {
                self.transition(ActionState::Succeeded);
                settlement.hooks.on_success(payload);
            }
            Err(e) => {
                warn!("{}: [{}] failed: {}", self.label, request.id(), e);
                self.transition(ActionState::Failed);
                settlement.hooks.on_failure(e.kind(), &e.to_string(), e.body());
            }
        }

        drop(settlement);
        Triggered::Settled(result)
    }
}

/// Calls `on_settle` and returns the controller to Idle when dropped.
struct Settlement<'a> {
    state: &'a Mutex<ActionState>,
    hooks: &'a mut dyn PresentationHooks,
}

impl Drop for Settlement<'_> {
    fn drop(&mut self) {
        self.hooks.on_settle();
        *lock(self.state) = ActionState::Idle;
    }
}

/// Sends a request in the background. Failures are logged, never shown.
pub fn fire_and_forget(transport: Arc<dyn Transport>, request: ActionRequest) -> JoinHandle<()> {
    tokio::spawn(async move {
        match transport.execute(&request).await {
            Ok(_) => debug!("[{}] {} delivered", request.id(), request),
            Err(e) => warn!("[{}] {} dropped: {}", request.id(), request, e),
        }
    })
}
