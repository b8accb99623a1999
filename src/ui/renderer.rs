//! Frame composition and painting.
//!
//! [`compose`] turns the active level into a [`Frame`] of plain rows, which
//! is what tests inspect. [`FramePainter`] styles nothing by itself: it takes
//! already-styled lines and rewrites only the rows that differ from the last
//! frame it painted.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    style::Print,
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use crate::menu::item_numbers;
use crate::nav::MenuLevel;
use crate::ui::style::Palette;
use crate::utils::truncate_to_width;

const SELECTED_MARKER: &str = "> ";
const UNSELECTED_MARKER: &str = "  ";
const SUBMENU_SUFFIX: &str = " ›";
const BREADCRUMB_SEPARATOR: &str = " › ";
const KEY_HINT: &str = "↑/↓ move · enter select · esc back · type to jump";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Title,
    Breadcrumb,
    Item { selected: bool, enabled: bool },
    Separator,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub text: String,
}

/// One screenful, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Row>,
}

impl Frame {
    pub fn plain_lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.text.clone()).collect()
    }

    pub fn styled_lines(&self, palette: &Palette) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                let styled = match row.kind {
                    RowKind::Title => palette.title(&row.text),
                    RowKind::Breadcrumb | RowKind::Footer => palette.hint(&row.text),
                    RowKind::Item { selected: true, .. } => palette.selected(&row.text),
                    RowKind::Item { enabled: false, .. } | RowKind::Separator => {
                        palette.disabled(&row.text)
                    }
                    RowKind::Item { .. } => palette.normal(&row.text),
                };
                styled.to_string()
            })
            .collect()
    }

    /// Text of the highlighted row, if one is visible.
    pub fn selected_text(&self) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| matches!(row.kind, RowKind::Item { selected: true, .. }))
            .map(|row| row.text.as_str())
    }

    /// Item and separator rows, in display order.
    pub fn item_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .filter(|row| matches!(row.kind, RowKind::Item { .. } | RowKind::Separator))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_breadcrumb: bool,
    pub numbered: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_breadcrumb: true,
            numbered: false,
        }
    }
}

impl RenderOptions {
    /// Rows used by everything except the item window.
    pub fn chrome_rows(&self) -> usize {
        2 + usize::from(self.show_breadcrumb)
    }

    /// Item rows that fit in a terminal `terminal_rows` tall (at least one).
    pub fn item_rows(&self, terminal_rows: u16) -> usize {
        usize::from(terminal_rows)
            .saturating_sub(self.chrome_rows())
            .max(1)
    }
}

/// Build the frame for `level`.
///
/// `height` is the item window size; the level's scroll offset must already
/// keep the cursor inside it.
pub fn compose<T>(
    level: &MenuLevel<'_, T>,
    heading: &str,
    breadcrumb: &[&str],
    width: usize,
    height: usize,
    options: &RenderOptions,
) -> Frame {
    let mut rows = Vec::new();
    rows.push(Row {
        kind: RowKind::Title,
        text: truncate_to_width(heading, width),
    });

    if options.show_breadcrumb {
        let text = if breadcrumb.len() > 1 {
            breadcrumb.join(BREADCRUMB_SEPARATOR)
        } else {
            String::new()
        };
        rows.push(Row {
            kind: RowKind::Breadcrumb,
            text: truncate_to_width(&text, width),
        });
    }

    let items = level.items();
    let numbers = item_numbers(items);
    let start = level.scroll().min(items.len());
    let end = (start + height.max(1)).min(items.len());

    for idx in start..end {
        let item = &items[idx];
        if item.is_separator() {
            rows.push(Row {
                kind: RowKind::Separator,
                text: truncate_to_width(&format!("{}{}", UNSELECTED_MARKER, item.label), width),
            });
            continue;
        }

        let selected = level.cursor() == Some(idx);
        let marker = if selected {
            SELECTED_MARKER
        } else {
            UNSELECTED_MARKER
        };
        let number = match numbers[idx] {
            Some(n) if options.numbered => format!("{}. ", n),
            _ => String::new(),
        };
        let suffix = if item.is_submenu() { SUBMENU_SUFFIX } else { "" };
        rows.push(Row {
            kind: RowKind::Item {
                selected,
                enabled: item.enabled,
            },
            text: truncate_to_width(&format!("{}{}{}{}", marker, number, item.label, suffix), width),
        });
    }

    let footer = if items.len() > height {
        format!("[{}-{}/{}] {}", start + 1, end, items.len(), KEY_HINT)
    } else {
        KEY_HINT.to_string()
    };
    rows.push(Row {
        kind: RowKind::Footer,
        text: truncate_to_width(&footer, width),
    });

    Frame { rows }
}

/// Writes frames to a terminal, touching only rows that changed.
///
/// A full-screen painter owns the screen and clears it before the first
/// frame. An anchored painter draws below `origin` and leaves everything
/// above it alone.
#[derive(Debug)]
pub struct FramePainter {
    previous: Vec<String>,
    needs_clear: bool,
    clear_screen: bool,
    origin: u16,
}

impl Default for FramePainter {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePainter {
    pub fn new() -> Self {
        Self {
            previous: Vec::new(),
            needs_clear: true,
            clear_screen: true,
            origin: 0,
        }
    }

    /// Painter for the main screen whose first row is terminal row `origin`.
    pub fn anchored(origin: u16) -> Self {
        Self {
            previous: Vec::new(),
            needs_clear: false,
            clear_screen: false,
            origin,
        }
    }

    pub fn origin(&self) -> u16 {
        self.origin
    }

    /// The screen scrolled up by `rows`; painted rows moved with it.
    pub fn shift_up(&mut self, rows: u16) {
        self.origin = self.origin.saturating_sub(rows);
    }

    /// Forget the last frame; the next paint redraws everything.
    pub fn invalidate(&mut self) {
        self.previous.clear();
        self.needs_clear = self.clear_screen;
    }

    /// Rows on screen after the last paint.
    pub fn painted_rows(&self) -> usize {
        self.previous.len()
    }

    /// Paint `lines` and return how many rows were rewritten.
    pub fn paint<W: Write>(&mut self, out: &mut W, lines: &[String]) -> io::Result<usize> {
        if self.needs_clear {
            out.queue(Clear(ClearType::All))?;
            self.needs_clear = false;
        }

        let mut written = 0;
        for (row, line) in lines.iter().enumerate() {
            if self.previous.get(row) == Some(line) {
                continue;
            }
            out.queue(MoveTo(0, self.screen_row(row)))?
                .queue(Clear(ClearType::CurrentLine))?
                .queue(Print(line))?;
            written += 1;
        }
        for row in lines.len()..self.previous.len() {
            out.queue(MoveTo(0, self.screen_row(row)))?
                .queue(Clear(ClearType::CurrentLine))?;
            written += 1;
        }
        out.flush()?;

        self.previous = lines.to_vec();
        Ok(written)
    }

    fn screen_row(&self, row: usize) -> u16 {
        self.origin
            .saturating_add(u16::try_from(row).unwrap_or(u16::MAX))
    }
}
