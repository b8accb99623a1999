//! Nested menu levels. The last level is the one being navigated.

use tracing::debug;

use crate::nav::MenuLevel;

/// State of the stack after a pop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStatus {
    /// A parent level is active again
    Active,
    /// The root was popped; the session is over
    Empty,
}

#[derive(Debug)]
pub struct MenuStack<'m, T> {
    levels: Vec<MenuLevel<'m, T>>,
}

impl<'m, T> MenuStack<'m, T> {
    pub fn new(root: MenuLevel<'m, T>) -> Self {
        Self { levels: vec![root] }
    }

    pub fn push(&mut self, level: MenuLevel<'m, T>) {
        debug!("Entering submenu '{}' at depth {}", level.title(), self.levels.len());
        self.levels.push(level);
    }

    /// Remove the active level. Ancestors keep their cursor and scroll.
    pub fn pop(&mut self) -> StackStatus {
        if let Some(level) = self.levels.pop() {
            debug!("Leaving menu '{}'", level.title());
        }
        if self.levels.is_empty() {
            StackStatus::Empty
        } else {
            StackStatus::Active
        }
    }

    pub fn active(&self) -> Option<&MenuLevel<'m, T>> {
        self.levels.last()
    }

    pub fn active_mut(&mut self) -> Option<&mut MenuLevel<'m, T>> {
        self.levels.last_mut()
    }

    /// Number of levels currently open; 1 means only the root.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Titles from the root down to the active level.
    pub fn titles(&self) -> Vec<&'m str> {
        self.levels.iter().map(|level| level.title()).collect()
    }

    pub fn levels_mut(&mut self) -> impl Iterator<Item = &mut MenuLevel<'m, T>> {
        self.levels.iter_mut()
    }
}
