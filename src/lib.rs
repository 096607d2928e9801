//! presensi library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Person { .. } => cli::commands::person::handle(&cli.command, cfg),
        Commands::Window { .. } => cli::commands::window::handle(&cli.command, cfg),
        Commands::Holiday { .. } => cli::commands::holiday::handle(&cli.command, cfg),
        Commands::Schedule { .. } => cli::commands::schedule::handle(cli, cfg),
        Commands::Scan { .. } => cli::commands::scan::handle(cli, cfg),
        Commands::Override { .. } => cli::commands::overrides::handle(cli, cfg),
        Commands::Leave { .. } => cli::commands::leave::handle(cli, cfg),
        Commands::Report { .. } => cli::commands::report::handle(cli, cfg),
        Commands::Notify { .. } => cli::commands::notify::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load();

    // apply a --db override from the command line
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
