//! Auto-navigation: jump to items by typing the start of their label.
//!
//! Matching is a case-insensitive prefix test against labels of selectable
//! items. The buffer grows only with characters that still match something;
//! repeating the sole character of the buffer cycles through its matches.
//! In numbered mode digits address items by their displayed number.

use std::time::{Duration, Instant};

use crate::menu::{item_numbers, MenuItem};

/// Result of feeding one character to the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The character extended the buffer; first match in list order
    Extended(usize),
    /// Same leading character again; next match after the cursor
    Cycled(usize),
    /// Nothing matched; buffer left as it was
    NoMatch,
}

impl MatchOutcome {
    pub fn index(self) -> Option<usize> {
        match self {
            MatchOutcome::Extended(idx) | MatchOutcome::Cycled(idx) => Some(idx),
            MatchOutcome::NoMatch => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeAhead {
    buffer: String,
    last_input: Option<Instant>,
    timeout: Option<Duration>,
}

impl TypeAhead {
    /// `timeout` of `None` keeps the buffer until the next navigation key.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            buffer: String::new(),
            last_input: None,
            timeout,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.last_input = None;
    }

    /// Time left before the buffer expires, or `None` if nothing is pending.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let timeout = self.timeout?;
        let last = self.last_input?;
        Some(timeout.saturating_sub(now.saturating_duration_since(last)))
    }

    /// Drop the buffer if it has been idle longer than the timeout.
    pub fn expire_if_idle(&mut self, now: Instant) {
        if self.remaining(now) == Some(Duration::ZERO) {
            self.clear();
        }
    }

    /// Feed one typed character against `items`, with the cursor currently
    /// on `cursor`. Only a successful match touches the buffer.
    ///
    /// Repeating the buffer's character cycles before it extends, so "a",
    /// "a" walks through every item starting with "a".
    pub fn feed<T>(
        &mut self,
        ch: char,
        items: &[MenuItem<T>],
        cursor: Option<usize>,
        now: Instant,
    ) -> MatchOutcome {
        self.expire_if_idle(now);

        let typed: String = ch.to_lowercase().collect();
        let repeats_buffer =
            !self.buffer.is_empty() && self.buffer.chars().all(|c| typed.chars().all(|t| t == c));

        let mut stay = None;
        if repeats_buffer {
            let after = cursor.unwrap_or(items.len().saturating_sub(1));
            match next_match(items, &self.buffer, after) {
                Some(idx) if Some(idx) != cursor => {
                    self.last_input = Some(now);
                    return MatchOutcome::Cycled(idx);
                }
                found => stay = found,
            }
        }

        let mut extended = self.buffer.clone();
        extended.push_str(&typed);
        if let Some(idx) = first_match(items, &extended) {
            self.buffer = extended;
            self.last_input = Some(now);
            return MatchOutcome::Extended(idx);
        }

        // Sole match of a repeated character: stay put
        if let Some(idx) = stay {
            self.last_input = Some(now);
            return MatchOutcome::Cycled(idx);
        }

        MatchOutcome::NoMatch
    }

    /// Feed a digit in numbered mode. Digits typed before the timeout build
    /// a multi-digit number; when the longer number names no item the digit
    /// starts a new one.
    pub fn feed_number<T>(&mut self, digit: char, items: &[MenuItem<T>], now: Instant) -> MatchOutcome {
        self.expire_if_idle(now);

        let mut candidates = Vec::with_capacity(2);
        if !self.buffer.is_empty() && self.buffer.chars().all(|c| c.is_ascii_digit()) {
            candidates.push(format!("{}{}", self.buffer, digit));
        }
        candidates.push(digit.to_string());

        for candidate in candidates {
            let found = candidate
                .parse::<usize>()
                .ok()
                .and_then(|number| numbered_match(items, number));
            if let Some(idx) = found {
                self.buffer = candidate;
                self.last_input = Some(now);
                return MatchOutcome::Extended(idx);
            }
        }

        MatchOutcome::NoMatch
    }
}

fn matches_prefix<T>(item: &MenuItem<T>, prefix: &str) -> bool {
    item.is_selectable() && item.label.to_lowercase().starts_with(prefix)
}

/// First selectable item in list order whose label starts with `prefix`.
/// `prefix` must already be lowercase.
pub fn first_match<T>(items: &[MenuItem<T>], prefix: &str) -> Option<usize> {
    items.iter().position(|item| matches_prefix(item, prefix))
}

/// Next selectable match strictly after `after`, wrapping around; may return
/// `after` itself when it is the only match.
pub fn next_match<T>(items: &[MenuItem<T>], prefix: &str, after: usize) -> Option<usize> {
    let len = items.len();
    (1..=len)
        .map(|offset| (after + offset) % len)
        .find(|&idx| matches_prefix(&items[idx], prefix))
}

/// Selectable item shown with 1-based `number`, if any.
pub fn numbered_match<T>(items: &[MenuItem<T>], number: usize) -> Option<usize> {
    item_numbers(items)
        .iter()
        .position(|&n| n == Some(number))
        .filter(|&idx| items[idx].is_selectable())
}
