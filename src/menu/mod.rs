//! Menu tree model
//!
//! A [`Menu`] is the root definition handed to a session. Every row is a
//! [`MenuItem`] whose [`ItemKind`] says whether confirming it returns a value,
//! opens a nested level, or does nothing at all (separators).

pub mod definition;

use crate::error::{MenuError, Result};

/// What happens when an item is confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind<T> {
    /// Returns the payload to the caller
    Leaf(T),
    /// Opens a nested level built from these children
    Submenu(Vec<MenuItem<T>>),
    /// Decorative row; never selectable, never matched by type-ahead
    Separator,
}

/// A single row in a menu level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem<T> {
    pub label: String,
    pub kind: ItemKind<T>,
    pub enabled: bool,
}

impl<T> MenuItem<T> {
    pub fn leaf(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            kind: ItemKind::Leaf(value),
            enabled: true,
        }
    }

    pub fn submenu(label: impl Into<String>, children: Vec<MenuItem<T>>) -> Self {
        Self {
            label: label.into(),
            kind: ItemKind::Submenu(children),
            enabled: true,
        }
    }

    pub fn separator(text: impl Into<String>) -> Self {
        Self {
            label: text.into(),
            kind: ItemKind::Separator,
            enabled: false,
        }
    }

    /// Builder-style toggle, mostly used to grey out items.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether the cursor may rest on this item.
    pub fn is_selectable(&self) -> bool {
        self.enabled && !matches!(self.kind, ItemKind::Separator)
    }

    pub fn is_submenu(&self) -> bool {
        matches!(self.kind, ItemKind::Submenu(_))
    }

    pub fn is_separator(&self) -> bool {
        matches!(self.kind, ItemKind::Separator)
    }
}

impl MenuItem<String> {
    /// Leaf whose payload is its own label.
    pub fn option(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::leaf(label.clone(), label)
    }
}

/// Root of a menu tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<T> {
    pub title: String,
    pub prompt: Option<String>,
    pub items: Vec<MenuItem<T>>,
}

impl<T> Menu<T> {
    pub fn new(title: impl Into<String>, items: Vec<MenuItem<T>>) -> Self {
        Self {
            title: title.into(),
            prompt: None,
            items,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Header line shown above the root level; defaults to `"<title>> "`.
    pub fn prompt_text(&self) -> String {
        match &self.prompt {
            Some(prompt) => prompt.clone(),
            None => format!("{}> ", self.title),
        }
    }

    /// Check the whole tree for empty levels.
    ///
    /// Sessions only detect an empty submenu when the user enters it; this
    /// lets callers reject a broken tree up front.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(MenuError::empty(&self.title));
        }
        validate_items(&self.items)
    }

    /// Depth-first walk yielding `(depth, item)` for every row in the tree.
    pub fn walk(&self) -> Vec<(usize, &MenuItem<T>)> {
        let mut out = Vec::new();
        collect(&self.items, 0, &mut out);
        out
    }
}

fn validate_items<T>(items: &[MenuItem<T>]) -> Result<()> {
    for item in items {
        if let ItemKind::Submenu(children) = &item.kind {
            if children.is_empty() {
                return Err(MenuError::empty(&item.label));
            }
            validate_items(children)?;
        }
    }
    Ok(())
}

fn collect<'a, T>(items: &'a [MenuItem<T>], depth: usize, out: &mut Vec<(usize, &'a MenuItem<T>)>) {
    for item in items {
        out.push((depth, item));
        if let ItemKind::Submenu(children) = &item.kind {
            collect(children, depth + 1, out);
        }
    }
}

/// 1-based number of every non-separator row, in list order. Disabled rows
/// keep their number so the numbering does not shift when items toggle.
pub fn item_numbers<T>(items: &[MenuItem<T>]) -> Vec<Option<usize>> {
    let mut next = 0;
    items
        .iter()
        .map(|item| {
            if item.is_separator() {
                None
            } else {
                next += 1;
                Some(next)
            }
        })
        .collect()
}
