//! Terminal side of a menu session
//!
//! Key decoding, the terminal adapter and its crossterm backend, frame
//! rendering, styling, and the session loop that ties them to the
//! navigation engine.

pub mod crossterm_engine;
pub mod event_loop;
pub mod renderer;
pub mod session;
pub mod style;
pub mod terminal;

pub use crossterm_engine::CrosstermTerminal;
pub use event_loop::{Key, KeyBindings};
pub use renderer::{Frame, RenderOptions, Row, RowKind};
pub use session::{run_interactive, Session, SessionResult};
pub use style::Palette;
pub use terminal::{RawModeGuard, ScriptedTerminal, Terminal};
