//! Session controller: the blocking read → update → render loop.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::MenuConfig;
use crate::error::{MenuError, Result};
use crate::menu::Menu;
use crate::nav::{SelectionMachine, Transition};
use crate::ui::crossterm_engine::CrosstermTerminal;
use crate::ui::event_loop::Key;
use crate::ui::renderer::{compose, RenderOptions};
use crate::ui::terminal::{RawModeGuard, Terminal};

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum SessionResult<T> {
    Selected(T),
    Cancelled,
}

pub struct Session<'m, T> {
    menu: &'m Menu<T>,
    config: MenuConfig,
}

impl<'m, T: Clone> Session<'m, T> {
    pub fn new(menu: &'m Menu<T>, config: MenuConfig) -> Self {
        Self { menu, config }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_breadcrumb: self.config.show_breadcrumb,
            numbered: self.config.numbered,
        }
    }

    /// Run the menu until the user confirms a leaf or cancels out of the root.
    ///
    /// An empty root is rejected before the terminal is touched. Once raw
    /// mode is acquired it is restored on every exit path, errors included.
    pub fn run<Term: Terminal + ?Sized>(&self, terminal: &mut Term) -> Result<SessionResult<T>> {
        if self.menu.items.is_empty() {
            return Err(MenuError::empty(&self.menu.title));
        }

        let mut guard = RawModeGuard::acquire(terminal)?;
        info!("Menu session started: '{}'", self.menu.title);

        match self.drive(&mut *guard) {
            Ok(result) => {
                guard.release()?;
                info!("Menu session finished: {}", describe(&result));
                Ok(result)
            }
            Err(e) => {
                drop(guard);
                Err(e)
            }
        }
    }

    fn drive<Term: Terminal + ?Sized>(&self, terminal: &mut Term) -> Result<SessionResult<T>> {
        let render = self.render_options();
        let (mut columns, rows) = terminal.size()?;
        let mut machine =
            SelectionMachine::new(self.menu, self.config.nav_options(render.item_rows(rows)))?;
        self.paint(terminal, &machine, columns, &render)?;

        loop {
            let timeout = machine.type_ahead_deadline(Instant::now());
            let Some(key) = terminal.read_key(timeout)? else {
                machine.expire_type_ahead();
                continue;
            };

            let transition = match key {
                Key::Up => machine.move_up(),
                Key::Down => machine.move_down(),
                Key::Confirm => machine.confirm()?,
                Key::Cancel => machine.cancel(),
                Key::Char(c) => machine.type_character(c),
                Key::Resize(new_columns, new_rows) => {
                    debug!("Terminal resized to {}x{}", new_columns, new_rows);
                    columns = new_columns;
                    let height = self.config.nav_options(render.item_rows(new_rows)).viewport_height;
                    machine.resize(height)
                }
            };

            match transition {
                Transition::Idle => {}
                Transition::Moved => self.paint(terminal, &machine, columns, &render)?,
                Transition::Confirmed(value) => return Ok(SessionResult::Selected(value)),
                Transition::Cancelled => return Ok(SessionResult::Cancelled),
            }
        }
    }

    fn paint<Term: Terminal + ?Sized>(
        &self,
        terminal: &mut Term,
        machine: &SelectionMachine<'m, T>,
        columns: u16,
        render: &RenderOptions,
    ) -> Result<()> {
        let Some(level) = machine.active_level() else {
            return Ok(());
        };
        let heading = if machine.depth() == 1 {
            self.menu.prompt_text()
        } else {
            level.title().to_string()
        };
        let frame = compose(
            level,
            &heading,
            &machine.breadcrumb(),
            usize::from(columns),
            machine.viewport_height(),
            render,
        );
        terminal.present(&frame)
    }
}

fn describe<T>(result: &SessionResult<T>) -> &'static str {
    match result {
        SessionResult::Selected(_) => "selected",
        SessionResult::Cancelled => "cancelled",
    }
}

/// Run `menu` on the real terminal configured by `config`.
pub fn run_interactive<T: Clone>(menu: &Menu<T>, config: &MenuConfig) -> Result<SessionResult<T>> {
    let mut terminal = CrosstermTerminal::from_config(config)?;
    Session::new(menu, config.clone()).run(&mut terminal)
}
