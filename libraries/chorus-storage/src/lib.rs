//! Chorus Storage
//!
//! `SQLite` persistence for Chorus playlists, collaborations, song
//! membership, users and the song catalog.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each table owns its own queries (`playlists`,
//!   `collaborations`, `playlist_songs`, `songs`, `users`)
//! - **Repository Adapter**: [`SqliteStore`] implements the repository
//!   traits from `chorus-core` by delegating to the slices
//! - **Cascades**: deleting a playlist removes its memberships and
//!   collaborations through foreign keys
//!
//! # Example
//!
//! ```rust,no_run
//! use chorus_storage::{SqliteStore, create_pool, run_migrations};
//! use chorus_core::{PlaylistService, Repositories};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://chorus.db", 5).await?;
//! run_migrations(&pool).await?;
//!
//! let store = Arc::new(SqliteStore::new(pool));
//! let _service = PlaylistService::new(&Repositories::from_store(store));
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

// Vertical slices
pub mod collaborations;
pub mod playlist_songs;
pub mod playlists;
pub mod songs;
pub mod users;

pub use error::{Result, StorageError};
pub use store::SqliteStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://chorus.db>`)
/// * `max_connections` - upper bound on pooled connections
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(max_connections, "SQLite pool ready");

    Ok(pool)
}
