//! Session configuration
//!
//! Values come from, in increasing priority: built-in defaults, a TOML file
//! (`--config`, `$TERMENU_CONFIG`, or `<config dir>/termenu/config.toml`),
//! and command-line overrides applied by the binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Color;
use serde::Deserialize;
use tracing::debug;

use crate::error::{MenuError, Result};
use crate::nav::{NavOptions, WrapMode};

pub const CONFIG_ENV: &str = "TERMENU_CONFIG";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Wrap at the ends of a level instead of stopping there
    pub wrap: bool,
    /// Idle time after which the type-ahead buffer resets; 0 never resets
    pub type_ahead_timeout_ms: u64,
    /// Upper bound on item rows shown at once
    pub viewport_height: Option<u16>,
    /// Extra key that acts like Esc
    pub cancel_key: Option<char>,
    pub alternate_screen: bool,
    pub show_breadcrumb: bool,
    pub numbered: bool,
    pub palette: PaletteConfig,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            wrap: true,
            type_ahead_timeout_ms: 1000,
            viewport_height: None,
            cancel_key: None,
            alternate_screen: true,
            show_breadcrumb: true,
            numbered: false,
            palette: PaletteConfig::default(),
        }
    }
}

/// Color names as accepted by `colored` ("cyan", "bright black", ...)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub title: String,
    pub highlight: String,
    pub disabled: String,
    pub hint: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            title: "white".to_string(),
            highlight: "cyan".to_string(),
            disabled: "bright black".to_string(),
            hint: "bright black".to_string(),
        }
    }
}

impl MenuConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| MenuError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        debug!("Loading config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Load from an explicit path, the env override, or the default location.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            return Self::from_file(&path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn wrap_mode(&self) -> WrapMode {
        if self.wrap {
            WrapMode::Wrap
        } else {
            WrapMode::Clamp
        }
    }

    pub fn type_ahead_timeout(&self) -> Option<Duration> {
        match self.type_ahead_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Navigation options for a viewport that can show `available_rows` items.
    pub fn nav_options(&self, available_rows: usize) -> NavOptions {
        let cap = self.viewport_height.map(usize::from).unwrap_or(usize::MAX);
        NavOptions {
            wrap: self.wrap_mode(),
            type_ahead_timeout: self.type_ahead_timeout(),
            viewport_height: available_rows.min(cap).max(1),
            numbered: self.numbered,
        }
    }
}

/// `<config dir>/termenu/config.toml`, honoring `XDG_CONFIG_HOME` first.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .map(|dir| dir.join("termenu").join(CONFIG_FILENAME))
}

pub(crate) fn parse_color(name: &str) -> Result<Color> {
    name.parse::<Color>()
        .map_err(|_| MenuError::Config(format!("unknown color '{}'", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_wrap_with_one_second_timeout() {
        let config = MenuConfig::default();
        assert_eq!(config.wrap_mode(), WrapMode::Wrap);
        assert_eq!(config.type_ahead_timeout(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = MenuConfig::from_toml_str(
            r#"
wrap = false
type_ahead_timeout_ms = 0
cancel_key = "q"

[palette]
highlight = "green"
"#,
        )
        .unwrap();
        assert_eq!(config.wrap_mode(), WrapMode::Clamp);
        assert_eq!(config.type_ahead_timeout(), None);
        assert_eq!(config.cancel_key, Some('q'));
        assert_eq!(config.palette.highlight, "green");
        assert_eq!(config.palette.disabled, "bright black");
        assert!(config.alternate_screen);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = MenuConfig::from_toml_str("wrapp = true").unwrap_err();
        assert!(matches!(err, MenuError::Config(_)));
    }

    #[test]
    fn viewport_cap_applies() {
        let config = MenuConfig {
            viewport_height: Some(4),
            ..MenuConfig::default()
        };
        assert_eq!(config.nav_options(20).viewport_height, 4);
        assert_eq!(config.nav_options(2).viewport_height, 2);
        assert_eq!(config.nav_options(0).viewport_height, 1);
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.toml");
        fs::write(&path, "numbered = true\n").unwrap();
        let config = MenuConfig::load(Some(&path)).unwrap();
        assert!(config.numbered);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            MenuConfig::load(Some(&missing)),
            Err(MenuError::Io(_))
        ));
    }

    #[test]
    fn color_names_parse() {
        assert_eq!(parse_color("cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color("bright black").unwrap(), Color::BrightBlack);
        assert!(parse_color("plaid").is_err());
    }
}
