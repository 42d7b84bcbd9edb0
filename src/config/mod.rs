//! Sqlite-based local configuration
//!
//! Persistent storage for backend profiles (name + base URL), the
//! currently selected profile, and one stored session per profile. Lives
//! at the platform config directory; tests use an in-memory database.

use std::path::PathBuf;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

pub mod db;
pub mod models;
pub mod repository;

pub use models::Profile;

use crate::auth::{Session, TokenPair};

pub struct Config {
    pool: SqlitePool,
}

impl Config {
    /// Path to the sqlite database file, creating the directory if needed.
    pub fn get_db_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("avaliai-cli")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".avaliai-cli")
        };

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            log::info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.db"))
    }

    /// Path to the log file, kept alongside the database so state stays in
    /// one place regardless of the working directory.
    pub fn get_log_path() -> Result<PathBuf> {
        Ok(Self::get_db_path()?.with_file_name("avaliai-cli.log"))
    }

    pub async fn load() -> Result<Self> {
        let db_path = Self::get_db_path()?;
        log::debug!("Loading config from: {:?}", db_path);

        let pool = db::connect(&db_path).await?;
        db::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// In-memory config for tests.
    pub async fn new_test() -> Result<Self> {
        let pool = db::connect_memory().await?;
        db::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // Profile management

    pub async fn add_profile(&self, profile: Profile) -> Result<()> {
        repository::profiles::insert(&self.pool, profile).await
    }

    pub async fn get_profile(&self, name: &str) -> Result<Option<Profile>> {
        repository::profiles::get(&self.pool, name).await
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        repository::profiles::list(&self.pool).await
    }

    pub async fn remove_profile(&self, name: &str) -> Result<()> {
        repository::profiles::delete(&self.pool, name).await
    }

    pub async fn set_current_profile(&self, name: &str) -> Result<()> {
        repository::profiles::set_current(&self.pool, name).await
    }

    pub async fn current_profile(&self) -> Result<Option<Profile>> {
        match repository::profiles::get_current(&self.pool).await? {
            Some(name) => repository::profiles::get(&self.pool, &name).await,
            None => Ok(None),
        }
    }

    // Session management

    pub async fn save_session(&self, profile: &str, session: Session) -> Result<()> {
        repository::sessions::save(&self.pool, profile, session).await
    }

    pub async fn get_session(&self, profile: &str) -> Result<Option<Session>> {
        repository::sessions::get(&self.pool, profile).await
    }

    pub async fn update_session_tokens(&self, profile: &str, tokens: TokenPair) -> Result<()> {
        repository::sessions::update_tokens(&self.pool, profile, tokens).await
    }

    pub async fn clear_session(&self, profile: &str) -> Result<()> {
        repository::sessions::delete(&self.pool, profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_profile_round_trip() {
        let config = Config::new_test().await.unwrap();

        config
            .add_profile(Profile {
                name: "ifrn".to_string(),
                host: "https://api.avaliai.ifrn.edu.br".to_string(),
            })
            .await
            .unwrap();

        let profile = config.get_profile("ifrn").await.unwrap().unwrap();
        assert_eq!(profile.host, "https://api.avaliai.ifrn.edu.br");

        config.set_current_profile("ifrn").await.unwrap();
        let current = config.current_profile().await.unwrap().unwrap();
        assert_eq!(current.name, "ifrn");
    }

    #[test]
    fn test_log_file_lives_next_to_database() {
        let db_path = Config::get_db_path().unwrap();
        let log_path = Config::get_log_path().unwrap();
        assert_eq!(log_path.parent(), db_path.parent());
        assert_eq!(log_path.file_name().unwrap(), "avaliai-cli.log");
    }

    #[tokio::test]
    async fn test_set_current_requires_existing_profile() {
        let config = Config::new_test().await.unwrap();
        assert!(config.set_current_profile("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_session_round_trip_and_clear() {
        let config = Config::new_test().await.unwrap();
        config
            .add_profile(Profile {
                name: "local".to_string(),
                host: "http://localhost:8000".to_string(),
            })
            .await
            .unwrap();

        let session = Session {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            username: Some("aluno".to_string()),
            obtained_at: Utc::now(),
        };
        config.save_session("local", session).await.unwrap();

        config
            .update_session_tokens(
                "local",
                TokenPair {
                    access_token: "access-2".to_string(),
                    refresh_token: "refresh-2".to_string(),
                },
            )
            .await
            .unwrap();

        let stored = config.get_session("local").await.unwrap().unwrap();
        assert_eq!(stored.access_token, "access-2");
        assert_eq!(stored.refresh_token, "refresh-2");
        assert_eq!(stored.username.as_deref(), Some("aluno"));

        config.clear_session("local").await.unwrap();
        assert!(config.get_session("local").await.unwrap().is_none());

        // clearing twice stays a no-op
        config.clear_session("local").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_tokens_without_session_fails() {
        let config = Config::new_test().await.unwrap();
        let result = config
            .update_session_tokens(
                "nowhere",
                TokenPair {
                    access_token: "a".to_string(),
                    refresh_token: "r".to_string(),
                },
            )
            .await;
        assert!(result.is_err());
    }
}
