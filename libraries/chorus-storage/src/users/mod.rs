//! User records

use chorus_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Insert a user
pub async fn create(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query("INSERT INTO users (id, username, fullname) VALUES (?, ?, ?)")
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.fullname)
        .execute(pool)
        .await?;

    Ok(())
}

/// Check whether a user exists
pub async fn exists(pool: &SqlitePool, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count") > 0)
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, fullname FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
            fullname: row.get("fullname"),
        })
        .collect())
}
