//! Key decoding on top of crossterm polling.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical keystrokes understood by the navigation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Confirm,
    Cancel,
    Char(char),
    /// New terminal size in columns and rows
    Resize(u16, u16),
}

/// Extra key assignments on top of the fixed ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyBindings {
    pub cancel_key: Option<char>,
}

/// Translate a crossterm event; `None` for anything the menu ignores.
pub fn map_event(ev: CrosstermEvent, bindings: &KeyBindings) -> Option<Key> {
    match ev {
        CrosstermEvent::Key(key) => map_key(key, bindings),
        CrosstermEvent::Resize(cols, rows) => Some(Key::Resize(cols, rows)),
        _ => None,
    }
}

fn map_key(key: KeyEvent, bindings: &KeyBindings) -> Option<Key> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Key::Cancel),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Confirm),
        KeyCode::Esc => Some(Key::Cancel),
        KeyCode::Char(c) if bindings.cancel_key == Some(c) => Some(Key::Cancel),
        KeyCode::Char(c) if !c.is_control() => Some(Key::Char(c)),
        _ => None,
    }
}

/// Block until a recognized key arrives, or until `timeout` elapses.
///
/// Unrecognized events are swallowed without resetting the deadline.
pub fn poll_key(timeout: Option<Duration>, bindings: &KeyBindings) -> std::io::Result<Option<Key>> {
    let deadline = timeout.map(|t| Instant::now() + t);
    loop {
        if let Some(deadline) = deadline {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(None);
            }
        }
        if let Some(key) = map_event(event::read()?, bindings) {
            return Ok(Some(key));
        }
    }
}
