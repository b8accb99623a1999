use colored::Colorize;
use std::io::{self, Write};
use termenu::utils::pad_to_width;

const KEY_COLUMN: usize = 20;

#[derive(Default)]
pub struct RenderOpts {
    pub cancel_key: Option<char>,
}

fn key_line<W: Write>(out: &mut W, key: &str, action: &str) -> io::Result<()> {
    writeln!(out, "  {} - {}", pad_to_width(key, KEY_COLUMN), action)
}

pub fn render_keys_help<W: Write>(mut out: W, opts: &RenderOpts) -> io::Result<()> {
    writeln!(out, "{}", "termenu - Keys".bold())?;
    writeln!(out)?;

    writeln!(out, "{}", "Navigation:".bold())?;
    key_line(&mut out, "Up", "Move to the previous item")?;
    key_line(&mut out, "Down", "Move to the next item")?;
    key_line(&mut out, "Enter", "Open a submenu or choose the item")?;
    key_line(
        &mut out,
        "Esc, Ctrl+C, Ctrl+D",
        "Go back one level (quits at the top)",
    )?;
    if let Some(key) = opts.cancel_key {
        key_line(
            &mut out,
            &key.to_string(),
            "Go back one level (configured)",
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Type-ahead:".bold())?;
    writeln!(
        out,
        "  Typing letters jumps to the first item whose label starts with them."
    )?;
    writeln!(
        out,
        "  Pressing the same letter again cycles through items sharing it."
    )?;
    writeln!(
        out,
        "  With --numbered, digits jump to the item with that number."
    )?;
    writeln!(
        out,
        "  The typed prefix resets after an idle pause or any navigation key."
    )?;

    Ok(())
}
