//! Authentication: provider login, session storage, sign-out.

pub mod client;
pub mod session;

pub use client::{AuthClient, DEFAULT_PROVIDER_URL, LOGIN_BRIDGE_PATH};
pub use session::{MemorySessionStore, Session, SessionProvider, SqliteSessionStore, TokenPair};
