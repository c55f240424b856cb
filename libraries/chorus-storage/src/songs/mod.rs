//! Song catalog lookups and fixture inserts

use chorus_core::{error::Result, types::*};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

/// Insert a catalog song
pub async fn create(pool: &SqlitePool, song: NewSong) -> Result<Song> {
    let id = SongId::generate();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO songs (id, title, year, performer, genre, duration, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.performer)
    .bind(&song.genre)
    .bind(song.duration)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(Song {
        id,
        title: song.title,
        year: song.year,
        performer: song.performer,
        genre: song.genre,
        duration: song.duration,
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, year, performer, genre, duration, created_at, updated_at
        FROM songs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Song {
        id: row.get("id"),
        title: row.get("title"),
        year: row.get("year"),
        performer: row.get("performer"),
        genre: row.get("genre"),
        duration: row.get("duration"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }))
}

/// Check whether a song exists
pub async fn exists(pool: &SqlitePool, id: &SongId) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM songs WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count") > 0)
}
