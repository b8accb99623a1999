//! Menu definitions loaded from TOML or JSON files.
//!
//! ```toml
//! title = "Main"
//!
//! [[items]]
//! label = "Settings"
//! [[items.items]]
//! label = "Network"
//! value = "net"
//!
//! [[items]]
//! separator = "-------"
//!
//! [[items]]
//! label = "Exit"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{MenuError, Result};
use crate::menu::{Menu, MenuItem};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMenu {
    title: String,
    prompt: Option<String>,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawItem {
    label: Option<String>,
    value: Option<String>,
    items: Option<Vec<RawItem>>,
    separator: Option<String>,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Source format of a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Guess from the file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }
}

/// Parse a definition string into a validated menu.
pub fn parse_menu(source: &str, format: Format) -> Result<Menu<String>> {
    let raw: RawMenu = match format {
        Format::Toml => toml::from_str(source).map_err(|e| MenuError::Definition(e.to_string()))?,
        Format::Json => {
            serde_json::from_str(source).map_err(|e| MenuError::Definition(e.to_string()))?
        }
    };

    let items = convert_items(raw.items, &raw.title)?;
    let mut menu = Menu::new(raw.title, items);
    menu.prompt = raw.prompt;
    menu.validate()?;
    debug!("Loaded menu '{}' with {} rows", menu.title, menu.walk().len());
    Ok(menu)
}

/// Read and parse a definition file, picking the format from its extension.
pub fn load_menu(path: &Path) -> Result<Menu<String>> {
    let source = fs::read_to_string(path)?;
    parse_menu(&source, Format::from_path(path))
}

fn convert_items(raw: Vec<RawItem>, parent: &str) -> Result<Vec<MenuItem<String>>> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, item)| convert_item(item, parent, idx))
        .collect()
}

fn convert_item(raw: RawItem, parent: &str, idx: usize) -> Result<MenuItem<String>> {
    if let Some(text) = raw.separator {
        if raw.label.is_some() || raw.value.is_some() || raw.items.is_some() {
            return Err(MenuError::Definition(format!(
                "separator #{} in '{}' cannot carry label, value or items",
                idx + 1,
                parent
            )));
        }
        return Ok(MenuItem::separator(text));
    }

    let label = raw.label.ok_or_else(|| {
        MenuError::Definition(format!("item #{} in '{}' has no label", idx + 1, parent))
    })?;

    let item = match (raw.items, raw.value) {
        (Some(_), Some(_)) => {
            return Err(MenuError::Definition(format!(
                "item '{}' has both a value and nested items",
                label
            )))
        }
        (Some(children), None) => {
            let children = convert_items(children, &label)?;
            MenuItem::submenu(label, children)
        }
        (None, Some(value)) => MenuItem::leaf(label, value),
        (None, None) => MenuItem::option(label),
    };

    Ok(item.enabled(raw.enabled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::ItemKind;

    const SAMPLE: &str = r#"
title = "Main"
prompt = "main> "

[[items]]
label = "Settings"
[[items.items]]
label = "Network"
value = "net"
[[items.items]]
label = "Display"
enabled = false

[[items]]
separator = "-------"

[[items]]
label = "Exit"
"#;

    #[test]
    fn parses_nested_toml() {
        let menu = parse_menu(SAMPLE, Format::Toml).unwrap();
        assert_eq!(menu.title, "Main");
        assert_eq!(menu.prompt_text(), "main> ");
        assert_eq!(menu.items.len(), 3);

        match &menu.items[0].kind {
            ItemKind::Submenu(children) => {
                assert_eq!(children[0].kind, ItemKind::Leaf("net".to_string()));
                assert!(!children[1].enabled);
            }
            other => panic!("expected submenu, got {:?}", other),
        }
        assert!(menu.items[1].is_separator());
        assert_eq!(menu.items[2].kind, ItemKind::Leaf("Exit".to_string()));
    }

    #[test]
    fn parses_json() {
        let json = r#"{"title": "Pick", "items": [{"label": "OK"}]}"#;
        let menu = parse_menu(json, Format::Json).unwrap();
        assert_eq!(menu.items[0].kind, ItemKind::Leaf("OK".to_string()));
    }

    #[test]
    fn rejects_value_with_children() {
        let src = r#"
title = "Main"
[[items]]
label = "Both"
value = "x"
[[items.items]]
label = "Child"
"#;
        let err = parse_menu(src, Format::Toml).unwrap_err();
        assert!(err.to_string().contains("both a value and nested items"));
    }

    #[test]
    fn rejects_missing_label() {
        let src = "title = \"Main\"\n[[items]]\nvalue = \"x\"\n";
        let err = parse_menu(src, Format::Toml).unwrap_err();
        assert!(err.to_string().contains("has no label"));
    }

    #[test]
    fn rejects_empty_menu() {
        let err = parse_menu("title = \"Empty\"\n", Format::Toml).unwrap_err();
        assert!(matches!(err, MenuError::EmptyMenu { .. }));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("menu.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("menu.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("menu")), Format::Toml);
    }
}
