//! fieldflow library root.
//! Exposes the CLI parser, the high-level run() function, and the workflow
//! modules (store, access layer, role screens).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod screens;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::cli::parser::{Cli, Commands};
use crate::config::{Config, Latency};
use crate::core::access::AccessLayer;
use crate::core::notify::LogTableNotifier;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::store::KvRecordStore;

/// Open the access layer over the configured database.
pub fn open_access(cfg: &Config) -> AppResult<AccessLayer<KvRecordStore>> {
    let store = KvRecordStore::open(&cfg.database, &cfg.storage_key)?;
    let notifier = LogTableNotifier::open(&cfg.database)?;

    Ok(AccessLayer::new(store, cfg.latency).with_notifier(notifier))
}

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),

        // everything else happens inside a session
        cmd => {
            let access = open_access(cfg)?;
            let (Some(user), Some(password)) = (&cli.user, &cli.password) else {
                return Err(AppError::NotAuthenticated);
            };
            let session = Session::login(&access, user, password).await?;

            match cmd {
                Commands::Login => cli::commands::login::handle(&session),
                Commands::Submit { .. } => {
                    cli::commands::submit::handle(cmd, &session, &access).await
                }
                Commands::Inspect { .. } => {
                    cli::commands::inspect::handle(cmd, &session, &access).await
                }
                Commands::Contract { .. } => {
                    cli::commands::contract::handle(cmd, &session, &access).await
                }
                Commands::Init | Commands::Config { .. } | Commands::Log { .. } => Ok(()),
            }
        }
    }
}

/// Entry point usato da main.rs
pub async fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ carica config UNA sola volta
    let mut cfg = Config::load()?;

    // 3️⃣ override da riga di comando
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if cli.no_delay {
        cfg.latency = Latency::none();
    }

    // 4️⃣ passa tutto al dispatcher
    dispatch(&cli, &cfg).await
}
