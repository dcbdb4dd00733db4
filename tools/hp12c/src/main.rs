//! hp12c - command-line front end for the HP-12C engine
//!
//! With keys on the command line the keys are pressed in order and the final
//! display (or a JSON snapshot) is printed. Without keys an interactive
//! keypad starts.

mod keymap;
mod logging;
mod repl;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use hp12c_engine::{Calculator, EngineConfig};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "hp12c")]
#[command(about = "HP-12C financial calculator")]
#[command(long_about = "HP-12C financial calculator

Keys are keycap legends separated by spaces. Numbers may be typed whole.

Examples:
  hp12c 3 ENTER 4 +                          # 7,00
  hp12c 12 n 1 i 1000 CHS PV 0 PMT FV        # 1.126,83
  hp12c 1,012020 ENTER 1,012021 ΔDYS         # 366,00
  hp12c --json 2 ENTER 3 /                   # full state as JSON
  hp12c                                      # interactive keypad")]
#[command(version)]
struct Cli {
    /// Keys to press; starts the interactive keypad when empty
    #[arg(allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Print the full calculator state as JSON instead of the display
    #[arg(long)]
    json: bool,

    /// YAML configuration file (display and solver settings)
    #[arg(short, long, env = "HP12C_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure colored output
    if cli.no_color || cli.json {
        colored::control::set_override(false);
    }

    logging::init(cli.verbose, cli.log_json, !cli.no_color, !cli.keys.is_empty());

    let config = EngineConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(?config, "configuration loaded");
    let mut calc = Calculator::with_config(config);

    if cli.keys.is_empty() {
        return repl::run(&mut calc);
    }

    run_batch(&mut calc, &cli.keys);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view::snapshot_json(&calc))?);
    } else {
        println!("{}", view::display_line(&calc));
    }
    Ok(())
}

/// Press every key given on the command line
fn run_batch(calc: &mut Calculator, words: &[String]) {
    for word in words {
        for key in keymap::expand(word) {
            calc.press_key(&key);
        }
    }
}
