//! formwork demo - connect to a server through a multi-step terminal form
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use formwork::settings::{default_config_path, init_config, load_settings};
use formwork_core::prelude::*;

/// Connect to a server through a multi-step terminal form
#[derive(Parser, Debug)]
#[command(name = "formwork-demo")]
#[command(about = "Composable terminal forms demo", long_about = None)]
struct Args {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Disable colors and text attributes
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(default_config_path);

    if args.init_config {
        if init_config(&config_path)? {
            eprintln!("Wrote default config to {}", config_path.display());
        } else {
            eprintln!("Config already exists at {}", config_path.display());
        }
        return Ok(());
    }

    let mut settings = load_settings(&config_path);
    if args.plain {
        settings.ui.plain = true;
    }

    let last_view = formwork::run(&settings)?;
    print!("{}", last_view);
    Ok(())
}
