//! Team domain module
//!
//! Teams are what the club administers: a club-internal name plus the
//! identificators and links used to find the team on Handball4All.

mod entity;
mod repository;
mod validation;

pub use entity::{parse_identificators, Team, TeamId};
pub use repository::TeamRepository;
pub use validation::{validate_internal_name, validate_team_id, TeamValidationError};

#[cfg(test)]
pub use repository::MockTeamRepository;
