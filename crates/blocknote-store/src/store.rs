//! Main store implementation for database operations.
//!
//! The `Store` type owns all four entity kinds (users, notebooks, blocks,
//! and the two connector tables) and provides the raw CRUD operations the
//! services build on. Every operation that creates or destroys an entity
//! together with its connector row runs inside a single transaction, so a
//! failure can never leave an entity without its required connector or a
//! connector pointing at nothing.

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::*;
use crate::schema;

/// Configuration for connecting to the database.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database connection URL.
    pub database_url: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Run migrations on connect.
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:blocknote.db".to_string(),
            max_connections: 5,
            run_migrations: true,
        }
    }
}

impl StoreConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `DATABASE_URL` - Optional, defaults to `sqlite:blocknote.db`
    /// - `DATABASE_MAX_CONNECTIONS` - Optional, defaults to 5
    /// - `DATABASE_RUN_MIGRATIONS` - Optional, defaults to true
    pub fn from_env() -> StoreResult<Self> {
        let defaults = Self::default();

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_connections);

        let run_migrations = std::env::var("DATABASE_RUN_MIGRATIONS")
            .ok()
            .map(|s| s.to_lowercase() != "false" && s != "0")
            .unwrap_or(true);

        Ok(Self {
            database_url,
            max_connections,
            run_migrations,
        })
    }
}

/// Database store for the blocknote backend.
///
/// Cheap to clone; all clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Connect to the database with the given configuration.
    ///
    /// Creates the database file if it does not exist and optionally runs
    /// migrations.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        tracing::info!(url = %config.database_url, "Connecting to database...");

        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database");

        if config.run_migrations {
            schema::run_migrations(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Connect to a fresh in-memory database with the schema applied.
    ///
    /// A single-connection pool keeps every query on the same in-memory
    /// database. Intended for tests.
    pub async fn connect_in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        schema::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a store from an existing connection pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ==================== User Operations ====================

    /// Insert a new user.
    ///
    /// Returns `EmailTaken` if the email is already registered; the unique
    /// index makes this safe under concurrent registration.
    pub async fn insert_user(&self, user: &NewUser) -> StoreResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash, created)
            VALUES (?, ?, ?, ?)
            RETURNING id, email, password_hash, created
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::EmailTaken(user.email.clone())
            }
            _ => StoreError::Database(e),
        })?;

        Ok(row)
    }

    /// Get a user by ID.
    pub async fn get_user_by_id(&self, id: Uuid) -> StoreResult<UserRow> {
        sqlx::query_as::<_, UserRow>(
            r#"SELECT id, email, password_hash, created FROM users WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::UserNotFound(id))
    }

    /// Get a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<UserRow>> {
        Ok(sqlx::query_as::<_, UserRow>(
            r#"SELECT id, email, password_hash, created FROM users WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    // ==================== Notebook Operations ====================

    /// Insert a notebook and the ownership row for its creator, atomically.
    ///
    /// The two writes share a transaction: there is no moment where the
    /// notebook exists without an owner able to reach it.
    pub async fn insert_notebook_owned(
        &self,
        notebook: &NewNotebook,
        owner_id: Uuid,
    ) -> StoreResult<NotebookRow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, NotebookRow>(
            r#"
            INSERT INTO notebooks (id, name, created)
            VALUES (?, ?, ?)
            RETURNING id, name, created
            "#,
        )
        .bind(notebook.id)
        .bind(&notebook.name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO notebook_ownership (user_id, notebook_id, granted)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(owner_id)
        .bind(notebook.id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row)
    }

    /// Get a notebook by ID without any access check.
    ///
    /// Services go through the authorization gate instead; this exists for
    /// internal use and tests.
    pub async fn get_notebook(&self, id: Uuid) -> StoreResult<NotebookRow> {
        sqlx::query_as::<_, NotebookRow>(
            r#"SELECT id, name, created FROM notebooks WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotebookNotFound(id))
    }

    /// List all notebooks reachable by a user through ownership rows.
    pub async fn list_notebooks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<NotebookRow>> {
        Ok(sqlx::query_as::<_, NotebookRow>(
            r#"
            SELECT n.id, n.name, n.created
            FROM notebooks n
            JOIN notebook_ownership o ON o.notebook_id = n.id
            WHERE o.user_id = ?
            ORDER BY o.granted, n.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Update a notebook's name.
    pub async fn update_notebook_name(&self, id: Uuid, name: &str) -> StoreResult<NotebookRow> {
        sqlx::query_as::<_, NotebookRow>(
            r#"
            UPDATE notebooks SET name = ?
            WHERE id = ?
            RETURNING id, name, created
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotebookNotFound(id))
    }

    /// Delete a notebook and everything reachable only through it, atomically.
    ///
    /// Removes, in one transaction: the member blocks, the membership rows,
    /// the ownership rows, and the notebook itself. A concurrent reader sees
    /// either the full pre-deletion state or none of it.
    pub async fn delete_notebook_cascade(&self, id: Uuid) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        // Member blocks would become unreachable orphans; remove them too.
        sqlx::query(
            r#"
            DELETE FROM blocks
            WHERE id IN (SELECT block_id FROM block_membership WHERE notebook_id = ?)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(r#"DELETE FROM block_membership WHERE notebook_id = ?"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(r#"DELETE FROM notebook_ownership WHERE notebook_id = ?"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(r#"DELETE FROM notebooks WHERE id = ?"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotebookNotFound(id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Check whether an ownership row exists for (user, notebook).
    pub async fn ownership_exists(&self, user_id: Uuid, notebook_id: Uuid) -> StoreResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM notebook_ownership
                WHERE user_id = ? AND notebook_id = ?
            )
            "#,
        )
        .bind(user_id)
        .bind(notebook_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    // ==================== Block Operations ====================

    /// Insert a block and its membership row for a notebook, atomically.
    pub async fn insert_block_in_notebook(
        &self,
        block: &NewBlock,
        notebook_id: Uuid,
    ) -> StoreResult<BlockRow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BlockRow>(
            r#"
            INSERT INTO blocks (id, kind, content, metadata, settings, created)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, kind, content, metadata, settings, created
            "#,
        )
        .bind(block.id)
        .bind(&block.kind)
        .bind(&block.content)
        .bind(block.metadata.clone().map(Json))
        .bind(block.settings.clone().map(Json))
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO block_membership (block_id, notebook_id, linked)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(block.id)
        .bind(notebook_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row)
    }

    /// List all blocks reachable from a notebook through membership rows,
    /// in insertion order.
    pub async fn list_blocks_for_notebook(&self, notebook_id: Uuid) -> StoreResult<Vec<BlockRow>> {
        Ok(sqlx::query_as::<_, BlockRow>(
            r#"
            SELECT b.id, b.kind, b.content, b.metadata, b.settings, b.created
            FROM blocks b
            JOIN block_membership m ON m.block_id = b.id
            WHERE m.notebook_id = ?
            ORDER BY m.rowid
            "#,
        )
        .bind(notebook_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Apply a partial update to a block. `None` fields keep the stored
    /// value.
    pub async fn update_block(&self, id: Uuid, update: &BlockUpdate) -> StoreResult<BlockRow> {
        sqlx::query_as::<_, BlockRow>(
            r#"
            UPDATE blocks SET
                kind = COALESCE(?, kind),
                content = COALESCE(?, content),
                metadata = COALESCE(?, metadata),
                settings = COALESCE(?, settings)
            WHERE id = ?
            RETURNING id, kind, content, metadata, settings, created
            "#,
        )
        .bind(&update.kind)
        .bind(&update.content)
        .bind(update.metadata.clone().map(Json))
        .bind(update.settings.clone().map(Json))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::BlockNotFound(id))
    }

    /// Delete a block and its membership row, atomically.
    pub async fn delete_block_cascade(&self, block_id: Uuid, notebook_id: Uuid) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(r#"DELETE FROM block_membership WHERE block_id = ? AND notebook_id = ?"#)
            .bind(block_id)
            .bind(notebook_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(r#"DELETE FROM blocks WHERE id = ?"#)
            .bind(block_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::BlockNotFound(block_id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Check whether a membership row exists for (block, notebook).
    pub async fn membership_exists(&self, block_id: Uuid, notebook_id: Uuid) -> StoreResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM block_membership
                WHERE block_id = ? AND notebook_id = ?
            )
            "#,
        )
        .bind(block_id)
        .bind(notebook_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Check whether a block row exists, regardless of membership.
    pub async fn block_exists(&self, id: Uuid) -> StoreResult<bool> {
        let result: (bool,) =
            sqlx::query_as(r#"SELECT EXISTS (SELECT 1 FROM blocks WHERE id = ?)"#)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }
}
