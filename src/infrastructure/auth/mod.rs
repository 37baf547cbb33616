//! Authorization infrastructure module
//!
//! Capabilities are granted to hashed bearer tokens in the configuration.

mod token;

pub use token::{hash_token, verify_token, TokenAuthorizer, TokenGrant};
