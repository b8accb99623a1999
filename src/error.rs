//! Error handling for termenu
//!
//! Defines the fatal error taxonomy of a menu session. Type-ahead misses and
//! unrecognized keys are not errors and never surface here.

use thiserror::Error;

/// Fatal conditions that abort a menu session
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("terminal unavailable: {0}")]
    TerminalUnavailable(String),

    #[error("menu '{title}' has no items")]
    EmptyMenu { title: String },

    #[error("invalid menu definition: {0}")]
    Definition(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

impl MenuError {
    pub(crate) fn empty(title: &str) -> Self {
        MenuError::EmptyMenu {
            title: title.to_string(),
        }
    }
}

/// Result type alias for menu operations
pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = MenuError::empty("Settings");
        assert_eq!(err.to_string(), "menu 'Settings' has no items");
    }

    #[test]
    fn test_io_errors_convert() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(MenuError::Io(_))));
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: anyhow::Result<()> =
            Err(MenuError::TerminalUnavailable("stdin is not a tty".to_string()))
                .context("failed to start menu session");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to start menu session"));
        assert!(format!("{:?}", err).contains("stdin is not a tty"));
    }
}
