use chorus_core::{error::Result, types::*};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn summary_from_row(row: &SqliteRow) -> PlaylistSummary {
    PlaylistSummary {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
    }
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name, owner FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Playlist {
        id: row.get("id"),
        name: row.get("name"),
        owner: row.get("owner"),
    }))
}

/// Get playlist joined with the owner's username
pub async fn get_summary(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<PlaylistSummary>> {
    let row = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        LEFT JOIN users u ON u.id = p.owner
        WHERE p.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(summary_from_row))
}

/// Get user's playlists (owned + collaborating)
pub async fn get_user_playlists(
    pool: &SqlitePool,
    user_id: &UserId,
) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        LEFT JOIN users u ON u.id = p.owner
        LEFT JOIN collaborations c ON c.playlist_id = p.id
        WHERE p.owner = ? OR c.user_id = ?
        GROUP BY p.id
        ORDER BY p.rowid
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(summary_from_row).collect())
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: NewPlaylist) -> Result<PlaylistId> {
    let row = sqlx::query("INSERT INTO playlists (id, name, owner) VALUES (?, ?, ?) RETURNING id")
        .bind(&playlist.id)
        .bind(&playlist.name)
        .bind(&playlist.owner)
        .fetch_one(pool)
        .await?;

    Ok(row.get("id"))
}

/// Delete playlist; memberships and collaborations cascade
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
