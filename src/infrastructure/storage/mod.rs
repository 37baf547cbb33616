//! Storage infrastructure - SQLite connection, table naming and schema lifecycle

mod schema;
mod sqlite;
mod tables;

pub use schema::SqliteSchemaManager;
pub use sqlite::{connect, DatabaseConfig};
pub use tables::TableNames;
