//! League domain module
//!
//! A league snapshot belongs to one team and is replaced as a whole whenever
//! fresh data is fetched.

mod entity;
mod lenient;
mod source;

pub use entity::{Game, LeagueData, LeagueMetadata, TabScore};
pub use source::LeagueSource;

#[cfg(test)]
pub use source::MockLeagueSource;
