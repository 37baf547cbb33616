//! CLI module for H4A Admin
//!
//! Subcommands:
//! - `serve`: run the settings page
//! - `install` / `uninstall`: create or drop the tables
//! - `sync`: fetch league data from Handball4All

pub mod schema;
pub mod serve;
pub mod sync;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// H4A Admin - club team administration for Handball4All
#[derive(Parser)]
#[command(name = "h4a-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the settings page server
    Serve,

    /// Create the tables (idempotent)
    Install,

    /// Drop all tables, continuing past individual failures
    Uninstall,

    /// Fetch league data for teams with a league URL
    Sync(sync::SyncArgs),
}

/// Load `.env` and configuration, then install logging
pub(crate) fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    logging::init_logging(&config.logging);

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Failed to load configuration, using defaults");
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync_with_team() {
        let cli = Cli::try_parse_from(["h4a-admin", "sync", "--team", "3"]).unwrap();

        match cli.command {
            Command::Sync(args) => assert_eq!(args.team, Some(3)),
            _ => panic!("expected sync command"),
        }
    }

    #[test]
    fn test_parse_lifecycle_commands() {
        assert!(matches!(
            Cli::try_parse_from(["h4a-admin", "install"]).unwrap().command,
            Command::Install
        ));
        assert!(matches!(
            Cli::try_parse_from(["h4a-admin", "uninstall"]).unwrap().command,
            Command::Uninstall
        ));
        assert!(Cli::try_parse_from(["h4a-admin", "activate"]).is_err());
    }
}
