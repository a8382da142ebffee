// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Careline - WhatsApp customer-care chat bridge.
//!
//! Binary entry point: `serve` runs the HTTP bridge, `chat` is a terminal
//! client for the direct chat endpoint, `config` inspects the effective
//! configuration.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod chat;
mod serve;
mod shutdown;

use std::path::PathBuf;

use careline_config::CarelineConfig;
use clap::{Parser, Subcommand};
use colored::Colorize;

/// Careline - WhatsApp customer-care chat bridge.
#[derive(Parser, Debug)]
#[command(name = "careline", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP bridge.
    Serve,
    /// Talk to a running bridge from the terminal.
    Chat {
        /// Chat endpoint URL. Defaults to the configured server address.
        #[arg(long)]
        url: Option<String>,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Validate configuration and report problems.
    Check,
    /// Print the effective configuration as TOML.
    Show,
}

fn load_config(path: Option<&PathBuf>) -> CarelineConfig {
    let loaded = match path {
        Some(path) => careline_config::load_and_validate_path(path),
        None => careline_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            careline_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// URL of the direct chat endpoint for the configured listener.
fn default_chat_url(config: &CarelineConfig) -> String {
    format!("http://{}:{}/chat", config.server.host, config.server.port)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config_path.as_ref());

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Chat { url }) => {
            let url = url.unwrap_or_else(|| default_chat_url(&config));
            chat::run_chat(&url).await
        }
        Some(Commands::Config {
            action: ConfigCommands::Check,
        }) => {
            println!("{}", "configuration is valid".green());
            Ok(())
        }
        Some(Commands::Config {
            action: ConfigCommands::Show,
        }) => match config.to_toml() {
            Ok(rendered) => {
                print!("{rendered}");
                Ok(())
            }
            Err(e) => Err(careline_core::CarelineError::Internal(format!(
                "failed to render config: {e}"
            ))),
        },
        None => {
            println!("careline: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
