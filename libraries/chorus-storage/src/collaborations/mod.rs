//! Collaborator grants on playlists

use chorus_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Check whether a user collaborates on a playlist
pub async fn is_collaborator(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<bool> {
    let row = sqlx::query(
        "SELECT COUNT(*) as count FROM collaborations WHERE playlist_id = ? AND user_id = ?",
    )
    .bind(playlist_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count") > 0)
}

/// Grant collaboration. Granting twice returns the existing record's id.
pub async fn add(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<CollaborationId> {
    let row = sqlx::query(
        r#"
        INSERT INTO collaborations (id, playlist_id, user_id)
        VALUES (?, ?, ?)
        ON CONFLICT(playlist_id, user_id) DO UPDATE SET user_id = excluded.user_id
        RETURNING id
        "#,
    )
    .bind(CollaborationId::generate())
    .bind(playlist_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

/// Revoke collaboration
pub async fn remove(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// All collaborations on a playlist
pub async fn get_for_playlist(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
) -> Result<Vec<Collaboration>> {
    let rows = sqlx::query(
        "SELECT id, playlist_id, user_id FROM collaborations WHERE playlist_id = ? ORDER BY rowid",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Collaboration {
            id: row.get("id"),
            playlist_id: row.get("playlist_id"),
            user_id: row.get("user_id"),
        })
        .collect())
}
