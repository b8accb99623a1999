//! termenu - interactive terminal menus
//!
//! This library renders nested choice lists in a terminal, moves a cursor
//! with arrow keys or by typing the start of a label, and returns the value
//! of the item the user confirms.

pub mod config;
pub mod error;
pub mod menu;
pub mod nav;
pub mod ui;
pub mod utils;

pub use config::MenuConfig;
pub use error::{MenuError, Result};
pub use menu::{ItemKind, Menu, MenuItem};
pub use ui::{run_interactive, Session, SessionResult};
