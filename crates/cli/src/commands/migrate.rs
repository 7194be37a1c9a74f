//! Database migration command.

use folio_core::db::MIGRATOR;

use super::{CommandError, connect};

/// Run pending submission store migrations.
///
/// # Errors
///
/// Returns `CommandError` if the store is unreachable or a migration
/// fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running submission store migrations...");
    MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
