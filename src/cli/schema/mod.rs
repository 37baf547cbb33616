//! Install and uninstall commands - table lifecycle

use tracing::info;

use crate::domain::SchemaManager;
use crate::Storage;

/// Create all tables
pub async fn install() -> anyhow::Result<()> {
    let config = super::bootstrap();
    let storage = Storage::open(&config).await?;

    storage.schema_manager().create_tables().await?;

    info!(tables = ?storage.tables.creation_order(), "Installed");
    Ok(())
}

/// Drop all tables; fails when any drop failed
pub async fn uninstall() -> anyhow::Result<()> {
    let config = super::bootstrap();
    let storage = Storage::open(&config).await?;

    storage.schema_manager().drop_tables().await?;

    info!(tables = ?storage.tables.drop_order(), "Uninstalled");
    Ok(())
}
