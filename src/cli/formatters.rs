//! Output formatting module for CLI display
//!
//! Session results and menu trees as plain text or JSON.

use colored::Colorize;
use serde::Serialize;
use termenu::{ItemKind, Menu, SessionResult};

/// Value of the selected item, or `None` when the menu was cancelled.
pub fn format_result_text(result: &SessionResult<String>) -> Option<String> {
    match result {
        SessionResult::Selected(value) => Some(value.clone()),
        SessionResult::Cancelled => None,
    }
}

pub fn format_result_json(result: &SessionResult<String>) -> String {
    serde_json::to_string(result)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Summary of a validated definition
pub fn format_check_json(menu: &Menu<String>) -> String {
    #[derive(Serialize)]
    struct JsonCheck<'a> {
        valid: bool,
        title: &'a str,
        rows: usize,
        depth: usize,
    }

    let rows = menu.walk();
    let depth = rows.iter().map(|(depth, _)| depth + 1).max().unwrap_or(0);
    let summary = JsonCheck {
        valid: true,
        title: &menu.title,
        rows: rows.len(),
        depth,
    };

    serde_json::to_string_pretty(&summary)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Indented tree of a menu, one row per line.
pub fn format_tree(menu: &Menu<String>) -> String {
    let mut output = format!("{}\n", menu.title.bold());

    for (depth, item) in menu.walk() {
        let indent = "  ".repeat(depth + 1);
        let line = match &item.kind {
            ItemKind::Separator => item.label.dimmed().to_string(),
            ItemKind::Submenu(children) => format!(
                "{} {}",
                item.label.cyan().bold(),
                format!("({} items)", children.len()).dimmed()
            ),
            ItemKind::Leaf(value) if *value == item.label => item.label.to_string(),
            ItemKind::Leaf(value) => format!("{} {}", item.label, format!("= {}", value).dimmed()),
        };
        let line = if item.enabled || item.is_separator() {
            line
        } else {
            format!("{} {}", line, "[disabled]".yellow())
        };
        output.push_str(&format!("{}{}\n", indent, line));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use termenu::MenuItem;

    fn sample() -> Menu<String> {
        colored::control::set_override(false);
        Menu::new(
            "Main",
            vec![
                MenuItem::submenu(
                    "Settings",
                    vec![
                        MenuItem::leaf("Network", "net".to_string()),
                        MenuItem::option("Display").enabled(false),
                    ],
                ),
                MenuItem::separator("---"),
                MenuItem::option("Exit"),
            ],
        )
    }

    #[test]
    fn tree_shows_nesting_values_and_disabled() {
        let tree = format_tree(&sample());
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Main",
                "  Settings (2 items)",
                "    Network = net",
                "    Display [disabled]",
                "  ---",
                "  Exit",
            ]
        );
    }

    #[test]
    fn cancelled_prints_nothing() {
        assert_eq!(format_result_text(&SessionResult::Cancelled), None);
        assert_eq!(
            format_result_text(&SessionResult::Selected("net".to_string())),
            Some("net".to_string())
        );
    }

    #[test]
    fn check_json_reports_depth() {
        let json: serde_json::Value = serde_json::from_str(&format_check_json(&sample())).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["rows"], 5);
        assert_eq!(json["depth"], 2);
    }
}
