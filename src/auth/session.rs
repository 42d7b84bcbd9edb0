//! Session state and the provider seam
//!
//! The HTTP client never reaches into ambient global state for tokens; it
//! is handed a [`SessionProvider`] capability at construction. Production
//! uses the sqlite-backed store keyed by profile; tests use the in-memory
//! store.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tokio::sync::RwLock;

/// Tokens held for the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub username: Option<String>,
    pub obtained_at: DateTime<Utc>,
}

/// Access/refresh pair as returned by the token endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Read side plus the two writes the client is allowed: replacing the token
/// pair after a refresh, and clearing everything on sign-out.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self) -> Result<Option<Session>>;
    async fn update_tokens(&self, tokens: TokenPair) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Sqlite-backed session store, one row per profile.
pub struct SqliteSessionStore {
    pool: SqlitePool,
    profile: String,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool, profile: String) -> Self {
        Self { pool, profile }
    }
}

#[async_trait]
impl SessionProvider for SqliteSessionStore {
    async fn current_session(&self) -> Result<Option<Session>> {
        crate::config::repository::sessions::get(&self.pool, &self.profile).await
    }

    async fn update_tokens(&self, tokens: TokenPair) -> Result<()> {
        crate::config::repository::sessions::update_tokens(&self.pool, &self.profile, tokens).await
    }

    async fn clear(&self) -> Result<()> {
        crate::config::repository::sessions::delete(&self.pool, &self.profile).await
    }
}

/// In-memory store for deterministic tests and one-off scripting.
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn empty() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionProvider for MemorySessionStore {
    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn update_tokens(&self, tokens: TokenPair) -> Result<()> {
        let mut guard = self.session.write().await;
        match guard.as_mut() {
            Some(session) => {
                session.access_token = tokens.access_token;
                session.refresh_token = tokens.refresh_token;
                Ok(())
            }
            None => anyhow::bail!("No session to update"),
        }
    }

    async fn clear(&self) -> Result<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            username: Some("prof.silva".to_string()),
            obtained_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_update_and_clear() {
        let store = MemorySessionStore::with_session(session());

        store
            .update_tokens(TokenPair {
                access_token: "access-2".to_string(),
                refresh_token: "refresh-2".to_string(),
            })
            .await
            .unwrap();

        let current = store.current_session().await.unwrap().unwrap();
        assert_eq!(current.access_token, "access-2");
        assert_eq!(current.username.as_deref(), Some("prof.silva"));

        store.clear().await.unwrap();
        assert!(store.current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_update_without_session_fails() {
        let store = MemorySessionStore::empty();
        let result = store
            .update_tokens(TokenPair {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
