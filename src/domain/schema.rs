//! Schema lifecycle trait

use async_trait::async_trait;

use super::DomainError;

/// Creates and removes the tables backing teams and league snapshots
#[async_trait]
pub trait SchemaManager: Send + Sync {
    /// Create all tables that are missing, all-or-nothing
    async fn create_tables(&self) -> Result<(), DomainError>;

    /// Drop every table, continuing past failures; errors list what could not be dropped
    async fn drop_tables(&self) -> Result<(), DomainError>;
}
