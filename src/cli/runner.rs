use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use termenu::menu::definition::load_menu;
use termenu::{run_interactive, MenuConfig, SessionResult};
use tracing::info;

use crate::cli::formatters::{format_check_json, format_result_json, format_result_text, format_tree};
use crate::cli::help::{render_keys_help, RenderOpts};
use crate::cli::{Cli, Commands, RunArgs};

/// Fold `run` flags over the file/env configuration. Flags only ever override.
pub fn apply_overrides(mut config: MenuConfig, args: &RunArgs) -> MenuConfig {
    if args.no_wrap {
        config.wrap = false;
    }
    if let Some(ms) = args.timeout_ms {
        config.type_ahead_timeout_ms = ms;
    }
    if let Some(height) = args.height {
        config.viewport_height = Some(height);
    }
    if args.numbered {
        config.numbered = true;
    }
    if args.inline {
        config.alternate_screen = false;
    }
    if args.cancel_key.is_some() {
        config.cancel_key = args.cancel_key;
    }
    config
}

pub fn load_config(path: Option<&Path>) -> Result<MenuConfig> {
    MenuConfig::load(path).with_context(|| match path {
        Some(p) => format!("Failed to load config from {}", p.display()),
        None => "Failed to load config".to_string(),
    })
}

/// Execute a parsed command line. Cancelling a menu exits with status 1.
pub fn execute(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Run(args) => {
            let config = apply_overrides(load_config(cli.config.as_deref())?, args);
            let menu = load_menu(&args.file)
                .with_context(|| format!("Failed to load menu {}", args.file.display()))?;
            info!("Running menu from {}", args.file.display());

            let result = run_interactive(&menu, &config).context("Menu session failed")?;
            if cli.json {
                println!("{}", format_result_json(&result));
            } else if let Some(text) = format_result_text(&result) {
                println!("{}", text);
            }

            Ok(match result {
                SessionResult::Selected(_) => ExitCode::SUCCESS,
                SessionResult::Cancelled => ExitCode::from(1),
            })
        }

        Commands::Check { file } => {
            let menu = load_menu(file)
                .with_context(|| format!("Failed to load menu {}", file.display()))?;
            if cli.json {
                println!("{}", format_check_json(&menu));
            } else {
                print!("{}", format_tree(&menu));
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Keys => {
            let config = load_config(cli.config.as_deref())?;
            let opts = RenderOpts {
                cancel_key: config.cancel_key,
            };
            render_keys_help(io::stdout().lock(), &opts)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
