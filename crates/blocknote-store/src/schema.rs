//! Schema definitions and migration utilities.
//!
//! The schema is embedded into the binary and applied on connect. All
//! statements are idempotent, so running the migration repeatedly is safe.

use sqlx::SqlitePool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the core schema (001_schema.sql).
pub const SCHEMA_MIGRATION: &str = include_str!("../../../migrations/001_schema.sql");

/// Run all pending migrations against the database.
///
/// Idempotent: every statement checks for existing objects before creating
/// them.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    tracing::debug!("Running schema migration (001_schema.sql)...");

    sqlx::raw_sql(SCHEMA_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::Migration(format!("schema migration failed: {}", e)))?;

    tracing::info!("Migrations completed");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `notebooks` table exists.
pub async fn is_schema_initialized(pool: &SqlitePool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM sqlite_master
            WHERE type = 'table' AND name = 'notebooks'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_migration_embedded() {
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS notebooks"));
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS blocks"));
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS notebook_ownership"));
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS block_membership"));
    }

    #[test]
    fn test_connector_pairs_are_unique() {
        assert!(SCHEMA_MIGRATION.contains("UNIQUE (user_id, notebook_id)"));
        assert!(SCHEMA_MIGRATION.contains("UNIQUE (block_id, notebook_id)"));
    }
}
