//! Command handlers and the shared session guard

pub mod auth;
pub mod catalog;
pub mod exam;
pub mod profile;
pub mod question;
pub mod raw;

pub use auth::{auth_command, AuthCommands};
pub use catalog::{
    classroom_command, discipline_command, tag_command, ClassroomCommands, DisciplineCommands,
    TagCommands,
};
pub use exam::{exam_command, ExamCommands};
pub use profile::{profile_command, ProfileCommands};
pub use question::{question_command, QuestionCommands};
pub use raw::{raw_command, RawCommands};

use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiClient;
use crate::auth::{Session, SessionProvider, SqliteSessionStore};
use crate::config::Profile;

/// Currently selected backend profile, or an actionable error.
pub(crate) async fn current_profile() -> Result<Profile> {
    crate::global_config().current_profile().await?.ok_or_else(|| {
        anyhow::anyhow!(
            "No profile selected. Add one with 'avaliai-cli profile add' and pick it with 'avaliai-cli profile select'."
        )
    })
}

/// Guard for authenticated commands: the CLI analog of the web app's
/// redirect-to-login when the session cookie is missing.
pub(crate) async fn require_session(profile: &Profile) -> Result<Session> {
    crate::global_config()
        .get_session(&profile.name)
        .await?
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Not signed in to profile '{}'. Run 'avaliai-cli auth login'.",
                profile.name
            )
        })
}

/// Build an [`ApiClient`] for the current profile, with its session store
/// injected. `AVALIAI_API_URL` overrides the profile host.
pub(crate) async fn api_client() -> Result<(Profile, ApiClient)> {
    let profile = current_profile().await?;
    let base_url =
        std::env::var("AVALIAI_API_URL").unwrap_or_else(|_| profile.host.clone());

    let sessions: Arc<dyn SessionProvider> = Arc::new(SqliteSessionStore::new(
        crate::global_config().pool().clone(),
        profile.name.clone(),
    ));

    let client = ApiClient::new(base_url, sessions);
    Ok((profile, client))
}
