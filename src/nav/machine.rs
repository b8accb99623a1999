//! Selection state machine.
//!
//! Owns the menu stack and the type-ahead buffer and turns navigation
//! requests into [`Transition`]s. `Confirmed` and `Cancelled` are terminal;
//! `Moved` asks the caller to repaint; `Idle` means nothing visible changed.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::{MenuError, Result};
use crate::menu::{ItemKind, Menu};
use crate::nav::type_ahead::MatchOutcome;
use crate::nav::{Direction, MenuLevel, MenuStack, StackStatus, TypeAhead, WrapMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<T> {
    Idle,
    Moved,
    Confirmed(T),
    Cancelled,
}

impl<T> Transition<T> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Transition::Confirmed(_) | Transition::Cancelled)
    }
}

/// Knobs that change navigation behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOptions {
    pub wrap: WrapMode,
    pub type_ahead_timeout: Option<Duration>,
    /// Item rows visible at once; used to keep the cursor on screen
    pub viewport_height: usize,
    /// Digits pick items by their displayed number instead of by label
    pub numbered: bool,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Wrap,
            type_ahead_timeout: Some(Duration::from_millis(1000)),
            viewport_height: 10,
            numbered: false,
        }
    }
}

#[derive(Debug)]
pub struct SelectionMachine<'m, T> {
    stack: MenuStack<'m, T>,
    type_ahead: TypeAhead,
    wrap: WrapMode,
    numbered: bool,
    viewport_height: usize,
}

impl<'m, T: Clone> SelectionMachine<'m, T> {
    pub fn new(menu: &'m Menu<T>, options: NavOptions) -> Result<Self> {
        let viewport_height = options.viewport_height.max(1);
        let mut root = MenuLevel::new(&menu.title, &menu.items)?;
        root.ensure_visible(viewport_height);
        Ok(Self {
            stack: MenuStack::new(root),
            type_ahead: TypeAhead::new(options.type_ahead_timeout),
            wrap: options.wrap,
            numbered: options.numbered,
            viewport_height,
        })
    }

    pub fn active_level(&self) -> Option<&MenuLevel<'m, T>> {
        self.stack.active()
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn breadcrumb(&self) -> Vec<&'m str> {
        self.stack.titles()
    }

    pub fn type_ahead_buffer(&self) -> &str {
        self.type_ahead.buffer()
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn move_up(&mut self) -> Transition<T> {
        self.step(Direction::Up)
    }

    pub fn move_down(&mut self) -> Transition<T> {
        self.step(Direction::Down)
    }

    fn step(&mut self, direction: Direction) -> Transition<T> {
        self.type_ahead.clear();
        let height = self.viewport_height;
        let wrap = self.wrap;
        let Some(level) = self.stack.active_mut() else {
            return Transition::Cancelled;
        };
        if level.step(direction, wrap) {
            level.ensure_visible(height);
            Transition::Moved
        } else {
            Transition::Idle
        }
    }

    /// Select the item under the cursor: open its submenu or return its value.
    ///
    /// Entering a submenu without children is fatal for the whole session.
    pub fn confirm(&mut self) -> Result<Transition<T>> {
        self.type_ahead.clear();
        let Some(level) = self.stack.active() else {
            return Ok(Transition::Cancelled);
        };
        let Some(item) = level.selected() else {
            trace!("Confirm ignored: no selectable item in '{}'", level.title());
            return Ok(Transition::Idle);
        };

        match &item.kind {
            ItemKind::Leaf(value) => {
                debug!("Confirmed '{}'", item.label);
                Ok(Transition::Confirmed(value.clone()))
            }
            ItemKind::Submenu(children) => {
                let mut child = MenuLevel::new(&item.label, children)?;
                child.ensure_visible(self.viewport_height);
                self.stack.push(child);
                Ok(Transition::Moved)
            }
            // The cursor never rests on a separator
            ItemKind::Separator => Err(MenuError::Definition(format!(
                "separator '{}' was selected",
                item.label
            ))),
        }
    }

    /// Leave the active level. Leaving the root ends the session.
    pub fn cancel(&mut self) -> Transition<T> {
        self.type_ahead.clear();
        match self.stack.pop() {
            StackStatus::Empty => Transition::Cancelled,
            StackStatus::Active => Transition::Moved,
        }
    }

    pub fn type_character(&mut self, ch: char) -> Transition<T> {
        self.type_character_at(ch, Instant::now())
    }

    /// Like [`type_character`](Self::type_character) with an explicit clock.
    pub fn type_character_at(&mut self, ch: char, now: Instant) -> Transition<T> {
        let height = self.viewport_height;
        let Some(level) = self.stack.active_mut() else {
            return Transition::Cancelled;
        };

        let outcome = if self.numbered && ch.is_ascii_digit() {
            self.type_ahead.feed_number(ch, level.items(), now)
        } else {
            self.type_ahead.feed(ch, level.items(), level.cursor(), now)
        };
        match outcome.index() {
            Some(idx) => {
                let moved = level.jump_to(idx);
                level.ensure_visible(height);
                if let MatchOutcome::Cycled(_) = outcome {
                    trace!("Type-ahead cycled to row {}", idx);
                }
                if moved {
                    Transition::Moved
                } else {
                    Transition::Idle
                }
            }
            None => {
                trace!("Type-ahead rejected {:?} (buffer {:?})", ch, self.type_ahead.buffer());
                Transition::Idle
            }
        }
    }

    /// Time until the type-ahead buffer expires, if it is pending.
    pub fn type_ahead_deadline(&self, now: Instant) -> Option<Duration> {
        self.type_ahead.remaining(now)
    }

    /// Drop the type-ahead buffer, e.g. after a read timed out.
    pub fn expire_type_ahead(&mut self) {
        self.type_ahead.clear();
    }

    /// Apply a new viewport height to every level so parents stay consistent.
    pub fn resize(&mut self, viewport_height: usize) -> Transition<T> {
        self.viewport_height = viewport_height.max(1);
        for level in self.stack.levels_mut() {
            level.ensure_visible(self.viewport_height);
        }
        Transition::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuItem;

    fn options(height: usize) -> NavOptions {
        NavOptions {
            viewport_height: height,
            ..NavOptions::default()
        }
    }

    fn nested() -> Menu<String> {
        Menu::new(
            "Main",
            vec![
                MenuItem::submenu(
                    "Settings",
                    vec![MenuItem::option("Network"), MenuItem::option("Display")],
                ),
                MenuItem::option("Exit"),
            ],
        )
    }

    fn cursor<T: Clone>(machine: &SelectionMachine<'_, T>) -> Option<usize> {
        machine.active_level().and_then(|level| level.cursor())
    }

    #[test]
    fn single_item_confirms_immediately() {
        let menu = Menu::new("Pick", vec![MenuItem::option("OK")]);
        let mut machine = SelectionMachine::new(&menu, options(5)).unwrap();
        assert_eq!(
            machine.confirm().unwrap(),
            Transition::Confirmed("OK".to_string())
        );
    }

    #[test]
    fn confirm_on_submenu_pushes_level() {
        let menu = nested();
        let mut machine = SelectionMachine::new(&menu, options(5)).unwrap();
        assert_eq!(machine.confirm().unwrap(), Transition::Moved);
        assert_eq!(machine.depth(), 2);
        let labels: Vec<&str> = machine
            .active_level()
            .unwrap()
            .items()
            .iter()
            .map(|item| item.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Network", "Display"]);
        assert_eq!(machine.breadcrumb(), vec!["Main", "Settings"]);
    }

    #[test]
    fn cancel_from_submenu_returns_to_parent_selection() {
        let menu = nested();
        let mut machine = SelectionMachine::new(&menu, options(5)).unwrap();
        machine.confirm().unwrap();
        machine.move_down();
        assert_eq!(machine.cancel(), Transition::Moved);
        assert_eq!(machine.depth(), 1);
        let level = machine.active_level().unwrap();
        assert_eq!(level.selected().unwrap().label, "Settings");
    }

    #[test]
    fn cancel_at_root_ends_session() {
        let menu = nested();
        let mut machine = SelectionMachine::new(&menu, options(5)).unwrap();
        assert_eq!(machine.cancel(), Transition::Cancelled);
        assert!(machine.active_level().is_none());
        assert_eq!(machine.move_down(), Transition::Cancelled);
    }

    #[test]
    fn push_then_cancel_preserves_cursor_and_scroll() {
        let mut items: Vec<MenuItem<String>> =
            (0..8).map(|i| MenuItem::option(format!("item{}", i))).collect();
        items.push(MenuItem::submenu("More", vec![MenuItem::option("Deep")]));
        let menu = Menu::new("Main", items);
        let mut machine = SelectionMachine::new(&menu, options(3)).unwrap();

        machine.move_up();
        let before = {
            let level = machine.active_level().unwrap();
            (level.cursor(), level.scroll())
        };
        assert_eq!(before, (Some(8), 6));

        machine.confirm().unwrap();
        machine.cancel();
        let level = machine.active_level().unwrap();
        assert_eq!((level.cursor(), level.scroll()), before);
    }

    #[test]
    fn all_disabled_confirm_is_noop() {
        let menu = Menu::new(
            "Locked",
            vec![
                MenuItem::option("a").enabled(false),
                MenuItem::option("b").enabled(false),
            ],
        );
        let mut machine = SelectionMachine::new(&menu, options(5)).unwrap();
        assert_eq!(cursor(&machine), None);
        assert_eq!(machine.confirm().unwrap(), Transition::Idle);
        assert_eq!(machine.move_down(), Transition::Idle);
        assert_eq!(machine.type_character('a'), Transition::Idle);
        assert_eq!(cursor(&machine), None);
    }

    #[test]
    fn empty_submenu_is_fatal() {
        let menu = Menu::new(
            "Main",
            vec![MenuItem::<String>::submenu("Nothing here", vec![])],
        );
        let mut machine = SelectionMachine::new(&menu, options(5)).unwrap();
        assert!(matches!(
            machine.confirm(),
            Err(MenuError::EmptyMenu { .. })
        ));
    }

    #[test]
    fn type_ahead_scenario_apple_banana_avocado() {
        let menu = Menu::new(
            "Fruit",
            vec![
                MenuItem::option("Apple"),
                MenuItem::option("Banana"),
                MenuItem::option("Avocado"),
            ],
        );
        let mut machine = SelectionMachine::new(&menu, options(5)).unwrap();
        machine.move_down();
        assert_eq!(machine.type_character('a'), Transition::Moved);
        assert_eq!(cursor(&machine), Some(0));
        assert_eq!(machine.type_character('a'), Transition::Moved);
        assert_eq!(cursor(&machine), Some(2));
    }

    #[test]
    fn arrow_keys_reset_type_ahead() {
        let menu = Menu::new(
            "Fruit",
            vec![MenuItem::option("Apple"), MenuItem::option("Apricot")],
        );
        let mut machine = SelectionMachine::new(&menu, options(5)).unwrap();
        machine.type_character('a');
        assert_eq!(machine.type_ahead_buffer(), "a");
        machine.move_down();
        assert_eq!(machine.type_ahead_buffer(), "");
    }

    #[test]
    fn type_ahead_scrolls_match_into_view() {
        let items: Vec<MenuItem<String>> = ["one", "two", "three", "four", "five", "six"]
            .iter()
            .map(|label| MenuItem::option(*label))
            .collect();
        let menu = Menu::new("Numbers", items);
        let mut machine = SelectionMachine::new(&menu, options(2)).unwrap();
        assert_eq!(machine.type_character('s'), Transition::Moved);
        let level = machine.active_level().unwrap();
        assert_eq!(level.cursor(), Some(5));
        assert_eq!(level.scroll(), 4);
    }

    #[test]
    fn root_starts_with_cursor_in_view() {
        let mut items: Vec<MenuItem<String>> = (0..8)
            .map(|i| MenuItem::option(format!("off{}", i)).enabled(false))
            .collect();
        items.push(MenuItem::option("Target"));
        let menu = Menu::new("Main", items);
        let machine = SelectionMachine::new(&menu, options(3)).unwrap();
        let level = machine.active_level().unwrap();
        assert_eq!(level.cursor(), Some(8));
        assert_eq!(level.scroll(), 6);
    }

    #[test]
    fn repeated_letter_reaches_every_same_initial_item() {
        let menu = Menu::new(
            "Animals",
            vec![
                MenuItem::option("Aardvark"),
                MenuItem::option("Apple"),
                MenuItem::option("Avocado"),
            ],
        );
        let mut machine = SelectionMachine::new(&menu, options(5)).unwrap();
        assert_eq!(machine.type_character('a'), Transition::Idle);
        assert_eq!(machine.type_character('a'), Transition::Moved);
        assert_eq!(cursor(&machine), Some(1));
        assert_eq!(machine.type_character('a'), Transition::Moved);
        assert_eq!(cursor(&machine), Some(2));
    }

    #[test]
    fn digits_select_by_number_only_when_numbered() {
        let menu = Menu::new(
            "Years",
            vec![
                MenuItem::option("2023 report"),
                MenuItem::option("Summary"),
                MenuItem::option("Archive"),
            ],
        );
        let numbered = NavOptions {
            numbered: true,
            ..options(5)
        };
        let mut machine = SelectionMachine::new(&menu, numbered).unwrap();
        assert_eq!(machine.type_character('3'), Transition::Moved);
        assert_eq!(cursor(&machine), Some(2));

        // Without numbering a digit is matched against labels
        let mut plain = SelectionMachine::new(&menu, options(5)).unwrap();
        plain.move_down();
        assert_eq!(plain.type_character('2'), Transition::Moved);
        assert_eq!(cursor(&plain), Some(0));
    }

    #[test]
    fn resize_clamps_every_level() {
        let items: Vec<MenuItem<String>> =
            (0..10).map(|i| MenuItem::option(format!("item{}", i))).collect();
        let menu = Menu::new("Main", items);
        let mut machine = SelectionMachine::new(&menu, options(2)).unwrap();
        machine.move_up();
        assert_eq!(machine.active_level().unwrap().scroll(), 8);
        assert_eq!(machine.resize(20), Transition::Moved);
        assert_eq!(machine.active_level().unwrap().scroll(), 0);
    }
}
