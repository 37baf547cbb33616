//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID must be a positive integer, got '{0}'")]
    InvalidId(String),

    #[error("Internal name cannot be empty")]
    EmptyInternalName,
}

/// Validate a raw team ID value
pub fn validate_team_id(id: i64) -> Result<(), TeamValidationError> {
    if id <= 0 {
        return Err(TeamValidationError::InvalidId(id.to_string()));
    }

    Ok(())
}

/// Validate the club-internal team name
///
/// Only a blank name is rejected; form input is otherwise sanitized, never refused.
pub fn validate_internal_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyInternalName);
    }

    Ok(())
}
