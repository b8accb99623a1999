//! Crossterm backend for the terminal adapter.

use std::io::{self, IsTerminal, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::{self, Hide, MoveTo, Show},
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
        ScrollUp,
    },
    QueueableCommand,
};
use tracing::debug;

use crate::config::MenuConfig;
use crate::error::{MenuError, Result};
use crate::ui::event_loop::{poll_key, Key, KeyBindings};
use crate::ui::renderer::{Frame, FramePainter};
use crate::ui::style::Palette;
use crate::ui::terminal::Terminal;

/// The real terminal: stdin for keys, stdout for frames.
pub struct CrosstermTerminal {
    out: Stdout,
    bindings: KeyBindings,
    palette: Palette,
    alternate_screen: bool,
    painter: FramePainter,
    raw: bool,
}

impl CrosstermTerminal {
    pub fn new(bindings: KeyBindings, palette: Palette, alternate_screen: bool) -> Self {
        Self {
            out: io::stdout(),
            bindings,
            palette,
            alternate_screen,
            painter: FramePainter::new(),
            raw: false,
        }
    }

    pub fn from_config(config: &MenuConfig) -> Result<Self> {
        let bindings = KeyBindings {
            cancel_key: config.cancel_key,
        };
        let palette = Palette::from_config(&config.palette)?;
        Ok(Self::new(bindings, palette, config.alternate_screen))
    }

    fn prepare_screen(&mut self) -> io::Result<()> {
        if self.alternate_screen {
            self.out.queue(EnterAlternateScreen)?;
            self.painter.invalidate();
        } else {
            // Frames start on the cursor's row and leave earlier output alone
            let (_, row) = cursor::position()?;
            self.painter = FramePainter::anchored(row);
        }
        self.out.queue(Hide)?;
        self.out.flush()
    }

    /// Scroll the main screen when an anchored frame would run past the
    /// bottom row.
    fn make_room(&mut self, frame_rows: usize) -> io::Result<()> {
        let (_, rows) = terminal::size()?;
        let bottom = usize::from(self.painter.origin()) + frame_rows;
        let overflow = bottom.saturating_sub(usize::from(rows));
        let shift = u16::try_from(overflow)
            .unwrap_or(u16::MAX)
            .min(self.painter.origin());
        if shift > 0 {
            self.out.queue(ScrollUp(shift))?;
            self.painter.shift_up(shift);
        }
        Ok(())
    }

    fn reset_screen(&mut self) -> io::Result<()> {
        self.out.queue(Show)?;
        if self.alternate_screen {
            self.out.queue(LeaveAlternateScreen)?;
        } else {
            // Leave the last frame visible and continue below it
            let painted = u16::try_from(self.painter.painted_rows()).unwrap_or(u16::MAX);
            if painted > 0 {
                let last = self.painter.origin().saturating_add(painted - 1);
                self.out.queue(MoveTo(0, last))?.queue(Print("\r\n"))?;
            }
        }
        self.out.flush()
    }
}

impl Terminal for CrosstermTerminal {
    fn enter_raw_mode(&mut self) -> Result<()> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(MenuError::TerminalUnavailable(
                "stdin and stdout must both be a terminal".to_string(),
            ));
        }
        enable_raw_mode().map_err(|e| MenuError::TerminalUnavailable(e.to_string()))?;
        self.raw = true;

        if let Err(e) = self.prepare_screen() {
            let _ = self.restore_mode();
            return Err(e.into());
        }
        debug!("Raw mode enabled (alternate screen: {})", self.alternate_screen);
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        let screen = self.reset_screen();
        disable_raw_mode()?;
        debug!("Raw mode disabled");
        screen.map_err(Into::into)
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn read_key(&mut self, timeout: Option<Duration>) -> Result<Option<Key>> {
        let key = poll_key(timeout, &self.bindings)?;
        if let Some(Key::Resize(..)) = key {
            self.painter.invalidate();
        }
        Ok(key)
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        let lines = frame.styled_lines(&self.palette);
        if !self.alternate_screen {
            self.make_room(lines.len())?;
        }
        let written = self.painter.paint(&mut self.out, &lines)?;
        tracing::trace!("Repainted {} of {} rows", written, lines.len());
        Ok(())
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = self.restore_mode();
    }
}
