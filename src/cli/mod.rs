use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod formatters;
pub mod help;
pub mod runner;

#[derive(Parser)]
#[command(name = "termenu")]
#[command(version, about = "Interactive terminal menus with type-ahead navigation")]
#[command(
    long_about = "Run nested menus defined in TOML or JSON files. Move with the arrow keys, jump by typing the start of a label, confirm with Enter and go back with Esc. The selected value is printed on stdout."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Config file (defaults to $TERMENU_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a menu and print the value of the chosen item
    Run(RunArgs),

    /// Validate a menu definition and print its tree
    Check {
        /// Path to the TOML or JSON menu definition
        file: PathBuf,
    },

    /// Show the key bindings
    Keys,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to the TOML or JSON menu definition
    pub file: PathBuf,

    /// Stop at the first/last item instead of wrapping around
    #[arg(long)]
    pub no_wrap: bool,

    /// Type-ahead idle reset in milliseconds (0 keeps the buffer until a navigation key)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Maximum number of item rows shown at once
    #[arg(long)]
    pub height: Option<u16>,

    /// Prefix items with 1-based numbers
    #[arg(long)]
    pub numbered: bool,

    /// Draw in the main screen instead of the alternate screen
    #[arg(long)]
    pub inline: bool,

    /// Extra key that goes back like Esc (e.g. q)
    #[arg(long)]
    pub cancel_key: Option<char>,
}
