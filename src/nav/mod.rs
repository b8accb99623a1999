//! Navigation engine
//!
//! Everything here is pure state: no terminal access, no rendering. The
//! session feeds decoded keys into [`SelectionMachine`] and repaints whenever
//! a transition reports [`Transition::Moved`].

pub mod level;
pub mod machine;
pub mod stack;
pub mod type_ahead;

pub use level::MenuLevel;
pub use machine::{NavOptions, SelectionMachine, Transition};
pub use stack::{MenuStack, StackStatus};
pub use type_ahead::TypeAhead;

/// Behaviour of Up/Down at the ends of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Up on the first item goes to the last one, and vice versa
    #[default]
    Wrap,
    /// The cursor stays on the first/last selectable item
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}
