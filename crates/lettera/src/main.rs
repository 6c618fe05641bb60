// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lettera - LLM-assisted banking correspondence back office.
//!
//! This is the binary entry point for the Lettera service.

use clap::{Parser, Subcommand};

mod serve;

/// Lettera - LLM-assisted banking correspondence back office.
#[derive(Parser, Debug)]
#[command(name = "lettera", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Lettera API server.
    Serve,
    /// Validate the configuration and print the effective values.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match lettera_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            lettera_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("lettera serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            println!("configuration is valid");
            println!("  app.name             = {}", config.app.name);
            println!("  app.log_level        = {}", config.app.log_level);
            println!(
                "  server               = {}:{}",
                config.server.host, config.server.port
            );
            println!("  storage.database_path = {}", config.storage.database_path);
            println!("  yandexgpt.model      = {}", config.yandexgpt.model);
            println!(
                "  yandexgpt.api_key    = {}",
                if config.yandexgpt.api_key.is_some() {
                    "[configured]"
                } else {
                    "[from environment]"
                }
            );
        }
        None => {
            println!("lettera: use --help for available commands");
        }
    }
}
