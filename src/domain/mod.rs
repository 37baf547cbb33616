//! Domain layer - Core entities, rules and the seams to storage

pub mod auth;
pub mod error;
pub mod league;
pub mod notice;
pub mod schema;
pub mod team;

pub use auth::{Actor, Authorizer};
pub use error::DomainError;
pub use league::{Game, LeagueData, LeagueMetadata, LeagueSource, TabScore};
pub use notice::{Notice, NoticeStore, SessionId, Severity};
pub use schema::SchemaManager;
pub use team::{Team, TeamId, TeamRepository, TeamValidationError};
