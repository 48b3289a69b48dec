//! Presentation hooks for dashboard panels.
//!
//! Controllers run on background tasks, so the hooks cannot touch the
//! dashboard directly. Each call becomes an [`Action`] on the UI channel and
//! is applied by `update()` on the next loop iteration.

use std::sync::mpsc::Sender;

use log::debug;
use serde_json::Value;

use crate::core::action::{Action, PanelEvent, PanelId};
use crate::core::controller::PresentationHooks;
use crate::core::outcome::{FailureKind, Payload};

pub struct PanelHooks {
    id: PanelId,
    tx: Sender<Action>,
}

impl PanelHooks {
    pub fn new(id: PanelId, tx: Sender<Action>) -> Self {
        Self { id, tx }
    }

    fn send(&self, event: PanelEvent) {
        if self.tx.send(Action::Panel(self.id, event)).is_err() {
            debug!("{:?}: dashboard gone, dropping event", self.id);
        }
    }
}

impl PresentationHooks for PanelHooks {
    fn on_start(&mut self) {
        self.send(PanelEvent::Started);
    }

    fn on_success(&mut self, payload: &Payload) {
        self.send(PanelEvent::Succeeded(payload.clone()));
    }

    fn on_failure(&mut self, kind: FailureKind, message: &str, body: Option<&Value>) {
        self.send(PanelEvent::Failed(kind, message.to_string(), body.cloned()));
    }

    fn on_settle(&mut self) {
        self.send(PanelEvent::Settled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_hook_calls_become_actions() {
        let (tx, rx) = mpsc::channel();
        let mut hooks = PanelHooks::new(PanelId::Engagement, tx);
        hooks.on_start();
        hooks.on_failure(FailureKind::PayloadError, "eof", None);
        hooks.on_settle();

        let actions: Vec<Action> = rx.try_iter().collect();
        assert_eq!(
            actions,
            vec![
                Action::Panel(PanelId::Engagement, PanelEvent::Started),
                Action::Panel(PanelId::Engagement, PanelEvent::Failed(FailureKind::PayloadError, "eof".into(), None)),
                Action::Panel(PanelId::Engagement, PanelEvent::Settled),
            ]
        );
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut hooks = PanelHooks::new(PanelId::Performance, tx);
        hooks.on_start();
        hooks.on_settle();
    }
}
