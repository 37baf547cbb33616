//! Infrastructure layer - SQLite storage, notices, authorization and the Handball4All client

pub mod auth;
pub mod h4a;
pub mod logging;
pub mod notice;
pub mod sanitize;
pub mod storage;
pub mod team;
