use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::core::action::Action;

/// Waits up to `timeout` for a key and maps it to a dashboard action.
/// Resizes and unmapped keys yield `None`; the loop redraws anyway.
pub fn poll_action(timeout: Duration) -> io::Result<Option<Action>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let Event::Key(key_event) = event::read()? else {
        return Ok(None);
    };
    if key_event.kind != KeyEventKind::Press {
        return Ok(None);
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    Ok(match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(Action::Quit),
        (_, KeyCode::Char('r')) => Some(Action::Refresh),
        (_, KeyCode::Char('t')) => Some(Action::Train),
        _ => None,
    })
}
