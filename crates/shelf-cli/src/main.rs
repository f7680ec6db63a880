//! Shelf CLI - library circulation for librarians and members
//!
//! With no subcommand this runs the interactive login menu. The core library
//! does the work; this crate owns prompts, output, configuration, and logging.

mod app;
mod cli;
mod config;
mod constants;
mod helpers;
mod menu;
mod output;

use std::io::IsTerminal;

use clap::Parser;
use dialoguer::Password;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shelf_core::{Argon2Hasher, Circulation, CredentialHasher, CsvStore};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::config::{load_config, resolve_data_dir, ShelfConfig};
use crate::constants::exit_codes;

fn init_tracing(config: &ShelfConfig) {
    // Logs go to stderr so they never interleave with menu tables on stdout.
    let filter = EnvFilter::try_from_env("SHELF_LOG").unwrap_or_else(|_| {
        let level = config.log_level();
        EnvFilter::new(format!("shelf_core={level},shelf={level}"))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config);

    let data_dir = resolve_data_dir(&cli, &config);
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    match cli.command {
        Some(Commands::Check) => {
            let circulation = Circulation::new(CsvStore::open(&data_dir)?);
            match circulation.check_consistency() {
                Ok(()) => println!("Library data is consistent."),
                Err(err) => {
                    eprintln!("Error: {}", err);
                    std::process::exit(exit_codes::INTEGRITY_FAILED);
                }
            }
        }
        Some(Commands::HashPassword) => {
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
            println!("{}", Argon2Hasher::default().hash(&password)?);
        }
        None => {
            if !std::io::stdin().is_terminal() {
                return Err(anyhow::anyhow!(
                    "The interactive menu needs a terminal. Use `shelf check` for scripted runs."
                ));
            }
            let ctx = AppContext::new(&data_dir, &config)?;
            menu::run(&ctx)?;
        }
    }

    Ok(())
}
