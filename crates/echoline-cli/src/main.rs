use std::{
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use echoline_cli::{
    console::{Console, Flow},
    transport::JsonLines,
};
use echoline_compiler::phonetic;
use echoline_config::{Settings, expand_path};

/// Compile operator text into echo display payloads, one JSON line each.
#[derive(Parser)]
#[command(name = "echoline", version, about)]
struct Cli {
    /// Settings file (default: ~/.config/echoline/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings_path = cli
        .config
        .map(|path| expand_path(&path))
        .unwrap_or_else(Settings::config_path);
    log::info!("Settings path: {}", settings_path.display());

    let settings = Settings::load_or_init(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;
    let prefix = settings.command_prefix.clone();

    phonetic::warm_up();
    log::info!("Ready. Type {prefix}help for commands.");

    let mut console = Console::new(
        settings,
        settings_path,
        JsonLines::new(io::stdout()),
        io::stderr(),
    );

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        if console.handle_line(&line)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
