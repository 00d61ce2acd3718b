//! Platon - a multi-cursor plain-text editor for the terminal.
//!
//! # Usage
//!
//! ```bash
//! platon notes.txt
//! platon --theme light src/main.rs
//! platon --log-file platon.log --perf notes.txt
//! ```

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use platon::app::App;
use platon::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use platon::perf;

/// A multi-cursor plain-text editor for the terminal
#[derive(Parser, Debug)]
#[command(name = "platon", version, about, long_about = None)]
struct Cli {
    /// File to edit (created on first save if missing)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Disable syntax highlighting
    #[arg(long)]
    no_highlight: bool,

    /// Log timing of load, render and draw (needs --log-file or RUST_LOG)
    #[arg(long)]
    perf: bool,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(flags: &ConfigFlags) -> Result<()> {
    let mut filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    if flags.perf {
        filter = filter.add_directive("platon::perf=debug".parse()?);
    }

    if let Some(path) = &flags.log_file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(&effective)?;
    perf::set_enabled(effective.perf);

    let theme = effective.theme.unwrap_or(cli.theme).resolve();
    tracing::debug!(file = ?cli.file, ?effective, "starting");

    let mut app = App::new(cli.file)
        .with_theme(theme)
        .with_highlighting(!effective.no_highlight);

    app.run().context("Application error")
}
