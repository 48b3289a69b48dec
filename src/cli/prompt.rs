use std::io::{self, BufRead, Write};

use crate::core::confirm::Confirmer;

/// Prompts on stderr, reads one line from stdin.
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{prompt}").ok()?;
        stderr.flush().ok()?;

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(answer),
        }
    }
}
