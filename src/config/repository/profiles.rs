//! Repository for backend profiles (named base URLs)

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::config::models::Profile;

const CURRENT_PROFILE_KEY: &str = "current_profile";

pub async fn insert(pool: &SqlitePool, profile: Profile) -> Result<()> {
    sqlx::query("INSERT OR REPLACE INTO profiles (name, host) VALUES (?, ?)")
        .bind(&profile.name)
        .bind(&profile.host)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to save profile '{}'", profile.name))?;

    log::debug!("Saved profile: {}", profile.name);
    Ok(())
}

pub async fn get(pool: &SqlitePool, name: &str) -> Result<Option<Profile>> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT name, host FROM profiles WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await
            .with_context(|| format!("Failed to get profile '{}'", name))?;

    Ok(row.map(|(name, host)| Profile { name, host }))
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Profile>> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT name, host FROM profiles ORDER BY name")
            .fetch_all(pool)
            .await
            .context("Failed to list profiles")?;

    Ok(rows
        .into_iter()
        .map(|(name, host)| Profile { name, host })
        .collect())
}

/// Remove a profile and its stored session.
pub async fn delete(pool: &SqlitePool, name: &str) -> Result<()> {
    super::sessions::delete(pool, name).await?;

    let result = sqlx::query("DELETE FROM profiles WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to delete profile '{}'", name))?;

    if result.rows_affected() == 0 {
        anyhow::bail!("Profile '{}' not found", name);
    }

    log::debug!("Deleted profile: {}", name);
    Ok(())
}

pub async fn set_current(pool: &SqlitePool, name: &str) -> Result<()> {
    if get(pool, name).await?.is_none() {
        anyhow::bail!("Profile '{}' not found", name);
    }

    sqlx::query("INSERT OR REPLACE INTO app_state (key, value) VALUES (?, ?)")
        .bind(CURRENT_PROFILE_KEY)
        .bind(name)
        .execute(pool)
        .await
        .context("Failed to set current profile")?;

    Ok(())
}

pub async fn get_current(pool: &SqlitePool) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM app_state WHERE key = ?")
        .bind(CURRENT_PROFILE_KEY)
        .fetch_optional(pool)
        .await
        .context("Failed to get current profile")?;

    Ok(row.map(|(value,)| value))
}
