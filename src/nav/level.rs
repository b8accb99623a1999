//! One nesting depth of a menu: borrowed items plus cursor and scroll.

use crate::error::{MenuError, Result};
use crate::menu::MenuItem;
use crate::nav::{Direction, WrapMode};

#[derive(Debug)]
pub struct MenuLevel<'m, T> {
    title: &'m str,
    items: &'m [MenuItem<T>],
    cursor: Option<usize>,
    scroll: usize,
}

impl<'m, T> MenuLevel<'m, T> {
    /// Build a level with the cursor on the first selectable item.
    ///
    /// A level without any items is fatal; a level whose items are all
    /// disabled is legal and simply has no cursor.
    pub fn new(title: &'m str, items: &'m [MenuItem<T>]) -> Result<Self> {
        if items.is_empty() {
            return Err(MenuError::empty(title));
        }
        Ok(Self {
            title,
            items,
            cursor: items.iter().position(MenuItem::is_selectable),
            scroll: 0,
        })
    }

    pub fn title(&self) -> &'m str {
        self.title
    }

    pub fn items(&self) -> &'m [MenuItem<T>] {
        self.items
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn selected(&self) -> Option<&'m MenuItem<T>> {
        self.cursor.map(|idx| &self.items[idx])
    }

    pub fn selectable_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_selectable()).count()
    }

    /// Move the cursor onto `idx` if that item is selectable.
    pub fn jump_to(&mut self, idx: usize) -> bool {
        match self.items.get(idx) {
            Some(item) if item.is_selectable() && self.cursor != Some(idx) => {
                self.cursor = Some(idx);
                true
            }
            _ => false,
        }
    }

    /// Step one selectable item in `direction`. Returns whether the cursor moved.
    pub fn step(&mut self, direction: Direction, wrap: WrapMode) -> bool {
        let Some(current) = self.cursor else {
            return false;
        };
        let len = self.items.len();

        let next = match wrap {
            WrapMode::Wrap => (1..len)
                .map(|offset| match direction {
                    Direction::Down => (current + offset) % len,
                    Direction::Up => (current + len - offset) % len,
                })
                .find(|&idx| self.items[idx].is_selectable()),
            WrapMode::Clamp => match direction {
                Direction::Down => (current + 1..len).find(|&idx| self.items[idx].is_selectable()),
                Direction::Up => (0..current).rev().find(|&idx| self.items[idx].is_selectable()),
            },
        };

        match next {
            Some(idx) => {
                self.cursor = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Adjust scroll so the cursor sits inside `[scroll, scroll + height)`,
    /// clamping at both ends of the list.
    pub fn ensure_visible(&mut self, height: usize) {
        let height = height.max(1);
        let len = self.items.len();
        if len <= height {
            self.scroll = 0;
            return;
        }

        if let Some(cursor) = self.cursor {
            if cursor < self.scroll {
                self.scroll = cursor;
            } else if cursor >= self.scroll + height {
                self.scroll = cursor + 1 - height;
            }
        }
        self.scroll = self.scroll.min(len - height);
    }
}
