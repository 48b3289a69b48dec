//! Console presentation for one-shot commands.
//!
//! The "control" here is the command itself: `on_start` prints a busy line
//! on the status stream, `on_settle` clears it. Result lines are buffered and
//! written out by the caller once the action has settled.

use std::io::Write;

use log::debug;
use serde_json::Value;

use crate::core::controller::PresentationHooks;
use crate::core::outcome::{FailureKind, Payload};

use crate::insights::text::{Rendered, Wording, failure_line, not_enough_data};

pub struct ConsoleHooks<R> {
    wording: Wording,
    render: R,
    status: Box<dyn Write + Send>,
    busy: bool,
    pub output: Vec<String>,
    pub errors: Vec<String>,
}

impl<R> ConsoleHooks<R>
where
    R: FnMut(&Payload) -> Rendered + Send,
{
    pub fn new(wording: Wording, render: R, status: Box<dyn Write + Send>) -> Self {
        Self {
            wording,
            render,
            status,
            busy: false,
            output: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn failed(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<R> PresentationHooks for ConsoleHooks<R>
where
    R: FnMut(&Payload) -> Rendered + Send,
{
    fn on_start(&mut self) {
        self.busy = true;
        let _ = write!(self.status, "{}", self.wording.busy);
        let _ = self.status.flush();
    }

    fn on_success(&mut self, payload: &Payload) {
        match (self.render)(payload) {
            Ok(lines) => self.output.extend(lines),
            Err(message) => {
                debug!("render failed: {}", message);
                self.errors.push(failure_line(self.wording, &message));
            }
        }
    }

    fn on_failure(&mut self, kind: FailureKind, message: &str, body: Option<&Value>) {
        debug!("failure {:?}: {}", kind, message);
        // A prediction without enough history is a result, not an error.
        match not_enough_data(self.wording, kind, body) {
            Some(lines) => self.output.extend(lines),
            None => self.errors.push(failure_line(self.wording, message)),
        }
    }

    fn on_settle(&mut self) {
        self.busy = false;
        let _ = write!(self.status, "\r{:width$}\r", "", width = self.wording.busy.len());
        let _ = self.status.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WORDING: Wording = Wording {
        busy: "Loading...",
        failure: "Unable to load.",
        not_enough_data: &[],
    };

    fn hooks(render: fn(&Payload) -> Rendered) -> ConsoleHooks<fn(&Payload) -> Rendered> {
        ConsoleHooks::new(WORDING, render, Box::new(std::io::sink()))
    }

    #[test]
    fn test_busy_between_start_and_settle() {
        let mut h = hooks(|_| Ok(vec![]));
        h.on_start();
        assert!(h.is_busy());
        h.on_settle();
        assert!(!h.is_busy());
    }

    #[test]
    fn test_success_buffers_rendered_lines() {
        let mut h = hooks(|_| Ok(vec!["done".to_string()]));
        h.on_success(&Payload::Json(json!({})));
        assert_eq!(h.output, vec!["done"]);
        assert!(!h.failed());
    }

    #[test]
    fn test_render_error_reported_as_failure() {
        let mut h = hooks(|_| Err("bad shape".to_string()));
        h.on_success(&Payload::Json(json!({})));
        assert_eq!(h.errors, vec!["Unable to load. (bad shape)"]);
    }

    #[test]
    fn test_failure_buffered_apart_from_output() {
        let mut h = hooks(|_| Ok(vec!["ok".to_string()]));
        h.on_success(&Payload::Json(json!({})));
        h.on_failure(FailureKind::NetworkError, "refused", None);
        assert_eq!(h.output, vec!["ok"]);
        assert_eq!(h.errors, vec!["Unable to load. (refused)"]);
        assert!(h.failed());
    }

    #[test]
    fn test_not_enough_data_reply_is_output_not_error() {
        let mut h = ConsoleHooks::new(
            crate::insights::text::PERFORMANCE,
            |_: &Payload| -> Rendered { Ok(vec![]) },
            Box::new(std::io::sink()),
        );
        let body = json!({"error": "Could not generate prediction"});
        h.on_failure(FailureKind::HttpError(500), "Could not generate prediction", Some(&body));
        assert!(!h.failed());
        assert_eq!(h.output[0], "Not enough data to make a prediction yet.");
    }
}
