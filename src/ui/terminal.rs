//! Terminal adapter contract.
//!
//! A session talks to the terminal only through [`Terminal`]. Raw mode is
//! held by a [`RawModeGuard`], which restores the terminal when dropped, so
//! every exit path (return, `?`, panic unwind) gives the terminal back.

use std::collections::VecDeque;
use std::io;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use tracing::warn;

use crate::error::{MenuError, Result};
use crate::ui::event_loop::Key;
use crate::ui::renderer::Frame;

pub trait Terminal {
    /// Switch to raw, unbuffered input. Fails with `TerminalUnavailable`
    /// when the session is not interactive.
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Undo [`enter_raw_mode`](Terminal::enter_raw_mode). Must be idempotent.
    fn restore_mode(&mut self) -> Result<()>;

    /// Terminal size as `(columns, rows)`.
    fn size(&self) -> Result<(u16, u16)>;

    /// Block for the next recognized key. `timeout` of `None` waits forever;
    /// `Ok(None)` means the timeout elapsed first.
    fn read_key(&mut self, timeout: Option<Duration>) -> Result<Option<Key>>;

    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
pub struct RawModeGuard<'t, Term: Terminal + ?Sized> {
    terminal: &'t mut Term,
    active: bool,
}

impl<'t, Term: Terminal + ?Sized> RawModeGuard<'t, Term> {
    pub fn acquire(terminal: &'t mut Term) -> Result<Self> {
        terminal.enter_raw_mode()?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Restore now and report failures, instead of swallowing them in `Drop`.
    pub fn release(mut self) -> Result<()> {
        self.active = false;
        self.terminal.restore_mode()
    }
}

impl<Term: Terminal + ?Sized> Deref for RawModeGuard<'_, Term> {
    type Target = Term;

    fn deref(&self) -> &Term {
        &*self.terminal
    }
}

impl<Term: Terminal + ?Sized> DerefMut for RawModeGuard<'_, Term> {
    fn deref_mut(&mut self) -> &mut Term {
        &mut *self.terminal
    }
}

impl<Term: Terminal + ?Sized> Drop for RawModeGuard<'_, Term> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.terminal.restore_mode() {
                warn!("Failed to restore terminal mode: {}", e);
            }
        }
    }
}

/// In-memory terminal driven by a key script.
///
/// Each script entry is either a key or a timeout (`None`). Reading past the
/// end of the script is an I/O error, which doubles as a way to exercise
/// fault paths.
#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    script: VecDeque<Option<Key>>,
    size: (u16, u16),
    frames: Vec<Frame>,
    raw: bool,
    raw_entries: usize,
    restores: usize,
    refuse_raw: bool,
}

impl ScriptedTerminal {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            script: VecDeque::new(),
            size: (columns, rows),
            frames: Vec::new(),
            raw: false,
            raw_entries: 0,
            restores: 0,
            refuse_raw: false,
        }
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.script.extend(keys.into_iter().map(Some));
        self
    }

    pub fn push_key(&mut self, key: Key) {
        self.script.push_back(Some(key));
    }

    /// Queue a read that times out.
    pub fn push_timeout(&mut self) {
        self.script.push_back(None);
    }

    /// Make `enter_raw_mode` fail like a non-interactive stdin would.
    pub fn refuse_raw_mode(mut self) -> Self {
        self.refuse_raw = true;
        self
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub fn raw_entries(&self) -> usize {
        self.raw_entries
    }

    pub fn restores(&self) -> usize {
        self.restores
    }

    pub fn pending_keys(&self) -> usize {
        self.script.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn enter_raw_mode(&mut self) -> Result<()> {
        if self.refuse_raw {
            return Err(MenuError::TerminalUnavailable(
                "scripted terminal refused raw mode".to_string(),
            ));
        }
        self.raw = true;
        self.raw_entries += 1;
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<()> {
        if self.raw {
            self.raw = false;
            self.restores += 1;
        }
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(self.size)
    }

    fn read_key(&mut self, _timeout: Option<Duration>) -> Result<Option<Key>> {
        let entry = self.script.pop_front().ok_or_else(|| {
            MenuError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "key script exhausted",
            ))
        })?;
        if let Some(Key::Resize(columns, rows)) = entry {
            self.size = (columns, rows);
        }
        Ok(entry)
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_on_drop() {
        let mut term = ScriptedTerminal::new(80, 24);
        {
            let guard = RawModeGuard::acquire(&mut term).unwrap();
            assert!(guard.is_raw());
        }
        assert!(!term.is_raw());
        assert_eq!(term.restores(), 1);
    }

    #[test]
    fn release_restores_exactly_once() {
        let mut term = ScriptedTerminal::new(80, 24);
        let guard = RawModeGuard::acquire(&mut term).unwrap();
        guard.release().unwrap();
        assert_eq!(term.restores(), 1);
        assert_eq!(term.raw_entries(), 1);
    }

    #[test]
    fn guard_restores_during_panic_unwind() {
        let mut term = ScriptedTerminal::new(80, 24);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = RawModeGuard::acquire(&mut term).unwrap();
            panic!("render blew up");
        }));
        assert!(result.is_err());
        assert!(!term.is_raw());
        assert_eq!(term.restores(), 1);
    }

    #[test]
    fn refused_raw_mode_is_terminal_unavailable() {
        let mut term = ScriptedTerminal::new(80, 24).refuse_raw_mode();
        assert!(matches!(
            RawModeGuard::acquire(&mut term),
            Err(MenuError::TerminalUnavailable(_))
        ));
        assert_eq!(term.restores(), 0);
    }

    #[test]
    fn exhausted_script_is_an_io_error() {
        let mut term = ScriptedTerminal::new(80, 24).with_keys([Key::Down]);
        assert_eq!(term.read_key(None).unwrap(), Some(Key::Down));
        assert!(matches!(term.read_key(None), Err(MenuError::Io(_))));
    }
}
