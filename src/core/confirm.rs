//! # Confirmation Gates
//!
//! Destructive actions ask before anything is sent. A declined gate never
//! reaches the controller, so no request is issued and no hook runs.

use log::info;

use crate::core::request::ActionRequest;

/// Source of answers to confirmation prompts. `None` means input was closed.
pub trait Confirmer {
    fn ask(&mut self, prompt: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    None,
    /// Passes on `y` / `yes`, any case.
    YesNo { prompt: String },
    /// Passes only when the answer is exactly `phrase`. Case matters.
    TypedPhrase { prompt: String, phrase: String },
}

pub const DELETE_PHRASE: &str = "DELETE";

impl Confirmation {
    pub fn yes_no(prompt: impl Into<String>) -> Self {
        Confirmation::YesNo { prompt: prompt.into() }
    }

    pub fn typed(prompt: impl Into<String>, phrase: impl Into<String>) -> Self {
        Confirmation::TypedPhrase {
            prompt: prompt.into(),
            phrase: phrase.into(),
        }
    }

    /// Asks through `confirmer` if needed and reports whether to proceed.
    pub fn passes(&self, confirmer: &mut dyn Confirmer) -> bool {
        let passed = match self {
            Confirmation::None => return true,
            Confirmation::YesNo { prompt } => confirmer
                .ask(&format!("{prompt} [y/N] "))
                .map(|a| matches!(strip_line_ending(&a).trim().to_ascii_lowercase().as_str(), "y" | "yes"))
                .unwrap_or(false),
            Confirmation::TypedPhrase { prompt, phrase } => confirmer
                .ask(prompt)
                .map(|a| strip_line_ending(&a) == phrase)
                .unwrap_or(false),
        };
        if !passed {
            info!("confirmation declined");
        }
        passed
    }
}

/// A request that is only released once its gate passes.
#[derive(Debug, Clone)]
pub struct Gated {
    gate: Confirmation,
    request: ActionRequest,
}

impl Gated {
    pub fn new(gate: Confirmation, request: ActionRequest) -> Self {
        Self { gate, request }
    }

    pub fn gate(&self) -> &Confirmation {
        &self.gate
    }

    /// Returns the request if the user confirms, `None` otherwise.
    pub fn confirm(self, confirmer: &mut dyn Confirmer) -> Option<ActionRequest> {
        self.gate.passes(confirmer).then_some(self.request)
    }
}

fn strip_line_ending(answer: &str) -> &str {
    answer.trim_end_matches(['\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedConfirmer;

    fn delete_gate() -> Confirmation {
        Confirmation::typed("Type \"DELETE\" to confirm.", DELETE_PHRASE)
    }

    #[test]
    fn test_none_never_prompts() {
        let mut c = ScriptedConfirmer::new(&[]);
        assert!(Confirmation::None.passes(&mut c));
        assert!(c.prompts.is_empty());
    }

    #[test]
    fn test_yes_no_accepts_yes_variants() {
        let gate = Confirmation::yes_no("Clear history?");
        for answer in ["y", "Y\n", "yes", " YES \r\n"] {
            assert!(gate.passes(&mut ScriptedConfirmer::new(&[answer])), "{answer:?}");
        }
    }

    #[test]
    fn test_yes_no_rejects_everything_else() {
        let gate = Confirmation::yes_no("Clear history?");
        for answer in ["", "n", "no", "sure"] {
            assert!(!gate.passes(&mut ScriptedConfirmer::new(&[answer])), "{answer:?}");
        }
        assert!(!gate.passes(&mut ScriptedConfirmer::new(&[])));
    }

    #[test]
    fn test_typed_phrase_requires_exact_match() {
        assert!(delete_gate().passes(&mut ScriptedConfirmer::new(&["DELETE\n"])));
        assert!(!delete_gate().passes(&mut ScriptedConfirmer::new(&["delete"])));
        assert!(!delete_gate().passes(&mut ScriptedConfirmer::new(&[" DELETE"])));
        assert!(!delete_gate().passes(&mut ScriptedConfirmer::new(&["Delete"])));
    }

    #[test]
    fn test_gated_request_released_only_on_pass() {
        let gated = Gated::new(delete_gate(), ActionRequest::post("/api/delete-account", None));
        assert!(gated.clone().confirm(&mut ScriptedConfirmer::new(&["delete"])).is_none());
        let released = gated.confirm(&mut ScriptedConfirmer::new(&["DELETE"]));
        assert_eq!(released.map(|r| r.endpoint().to_string()).as_deref(), Some("/api/delete-account"));
    }

    #[test]
    fn test_typed_phrase_prompt_is_shown_verbatim() {
        let mut c = ScriptedConfirmer::new(&["DELETE"]);
        delete_gate().passes(&mut c);
        assert_eq!(c.prompts, vec!["Type \"DELETE\" to confirm.".to_string()]);
    }
}
