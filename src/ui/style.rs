//! Styling collaborator: maps frame rows to colored strings.

use colored::{Color, ColoredString, Colorize};

use crate::config::{parse_color, PaletteConfig};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: Color,
    pub highlight: Color,
    pub disabled: Color,
    pub hint: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            title: Color::White,
            highlight: Color::Cyan,
            disabled: Color::BrightBlack,
            hint: Color::BrightBlack,
        }
    }
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Result<Self> {
        Ok(Self {
            title: parse_color(&config.title)?,
            highlight: parse_color(&config.highlight)?,
            disabled: parse_color(&config.disabled)?,
            hint: parse_color(&config.hint)?,
        })
    }

    pub fn title(&self, text: &str) -> ColoredString {
        text.color(self.title).bold()
    }

    pub fn selected(&self, text: &str) -> ColoredString {
        text.color(self.highlight).bold().reversed()
    }

    pub fn normal(&self, text: &str) -> ColoredString {
        text.normal()
    }

    pub fn disabled(&self, text: &str) -> ColoredString {
        text.color(self.disabled).dimmed()
    }

    pub fn hint(&self, text: &str) -> ColoredString {
        text.color(self.hint).italic()
    }
}
