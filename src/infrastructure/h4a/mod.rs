//! Handball4All integration - fetching league documents and syncing snapshots

mod client;
mod document;
mod sync;

pub use client::H4aClient;
pub use document::{parse_league_document, LeagueDocument};
pub use sync::{LeagueSyncService, SyncEntry, SyncOutcome, SyncReport};
