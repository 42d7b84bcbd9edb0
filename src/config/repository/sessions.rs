//! Repository for stored sessions, one row per profile

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::auth::{Session, TokenPair};

#[derive(sqlx::FromRow)]
struct DbSession {
    access_token: String,
    refresh_token: String,
    username: Option<String>,
    obtained_at: DateTime<Utc>,
}

/// Save or replace the session for a profile.
pub async fn save(pool: &SqlitePool, profile: &str, session: Session) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO sessions
            (profile_name, access_token, refresh_token, username, obtained_at, updated_at)
        VALUES (?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(profile)
    .bind(&session.access_token)
    .bind(&session.refresh_token)
    .bind(&session.username)
    .bind(session.obtained_at)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to save session for profile '{}'", profile))?;

    log::debug!("Saved session for profile: {}", profile);
    Ok(())
}

pub async fn get(pool: &SqlitePool, profile: &str) -> Result<Option<Session>> {
    let row: Option<DbSession> = sqlx::query_as(
        "SELECT access_token, refresh_token, username, obtained_at FROM sessions WHERE profile_name = ?",
    )
    .bind(profile)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("Failed to get session for profile '{}'", profile))?;

    Ok(row.map(|row| Session {
        access_token: row.access_token,
        refresh_token: row.refresh_token,
        username: row.username,
        obtained_at: row.obtained_at,
    }))
}

/// Replace only the token pair after a refresh.
pub async fn update_tokens(pool: &SqlitePool, profile: &str, tokens: TokenPair) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE sessions
        SET access_token = ?, refresh_token = ?, updated_at = CURRENT_TIMESTAMP
        WHERE profile_name = ?
        "#,
    )
    .bind(&tokens.access_token)
    .bind(&tokens.refresh_token)
    .bind(profile)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to update tokens for profile '{}'", profile))?;

    if result.rows_affected() == 0 {
        anyhow::bail!("No session found for profile '{}'", profile);
    }

    log::debug!("Updated tokens for profile: {}", profile);
    Ok(())
}

/// Delete the session row. Idempotent; sign-out calls this unconditionally.
pub async fn delete(pool: &SqlitePool, profile: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM sessions WHERE profile_name = ?")
        .bind(profile)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to delete session for profile '{}'", profile))?;

    if result.rows_affected() > 0 {
        log::debug!("Deleted session for profile: {}", profile);
    }

    Ok(())
}
