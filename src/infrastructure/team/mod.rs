//! Team infrastructure - SQLite persistence for teams and league snapshots

mod league;
mod repository;

pub use repository::SqliteTeamRepository;
