//! Song membership of playlists

use chorus_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Add song to playlist. Duplicates are stored as separate records.
pub async fn add(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<MembershipId> {
    let row = sqlx::query(
        "INSERT INTO playlist_songs (id, playlist_id, song_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(MembershipId::generate())
    .bind(playlist_id)
    .bind(song_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

/// Songs in a playlist, in insertion order
pub async fn get_songs(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id, s.title, s.performer
        FROM playlist_songs ps
        INNER JOIN songs s ON s.id = ps.song_id
        WHERE ps.playlist_id = ?
        ORDER BY ps.rowid
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SongSummary {
            id: row.get("id"),
            title: row.get("title"),
            performer: row.get("performer"),
        })
        .collect())
}

/// Remove every membership of a song, returning the number of rows deleted
pub async fn remove(pool: &SqlitePool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
