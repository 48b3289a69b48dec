//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::Transport;
use crate::core::confirm::Confirmer;
use crate::core::controller::PresentationHooks;
use crate::core::outcome::{ActionError, ActionResult, FailureKind, Payload};
use crate::core::request::ActionRequest;

/// A transport that answers every request with the same canned result.
pub struct StubTransport {
    result: ActionResult,
    delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<ActionRequest>>,
}

impl StubTransport {
    pub fn ok(body: Value) -> Self {
        Self::with_result(Ok(Payload::Json(body)))
    }

    pub fn failing(err: ActionError) -> Self {
        Self::with_result(Err(err))
    }

    pub fn with_result(result: ActionResult) -> Self {
        Self {
            result,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ActionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    fn name(&self) -> &str {
        "stub"
    }

    async fn execute(&self, request: &ActionRequest) -> ActionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

/// Hooks that record every call and model an enabled/disabled button.
pub struct RecordingHooks {
    pub enabled: bool,
    pub events: Vec<&'static str>,
    pub successes: Vec<Payload>,
    pub failures: Vec<(FailureKind, String, Option<Value>)>,
    pub settles: usize,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self {
            enabled: true,
            events: Vec::new(),
            successes: Vec::new(),
            failures: Vec::new(),
            settles: 0,
        }
    }
}

impl PresentationHooks for RecordingHooks {
    fn on_start(&mut self) {
        self.enabled = false;
        self.events.push("start");
    }

    fn on_success(&mut self, payload: &Payload) {
        self.events.push("success");
        self.successes.push(payload.clone());
    }

    fn on_failure(&mut self, kind: FailureKind, message: &str, body: Option<&Value>) {
        self.events.push("failure");
        self.failures.push((kind, message.to_string(), body.cloned()));
    }

    fn on_settle(&mut self) {
        self.enabled = true;
        self.settles += 1;
        self.events.push("settle");
    }
}

/// Answers prompts from a fixed script. Runs out → `None` (closed input).
pub struct ScriptedConfirmer {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front()
    }
}
