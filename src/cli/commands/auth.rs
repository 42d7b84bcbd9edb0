//! Session management commands

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use colored::*;
use dialoguer::Input;

use crate::auth::{AuthClient, Session, DEFAULT_PROVIDER_URL};
use crate::cli::ui::with_spinner;

use super::{current_profile, require_session};

#[derive(Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand)]
pub enum AuthSubcommands {
    /// Sign in with provider credentials and store the session locally
    Login {
        /// Provider username (prompted when omitted)
        #[arg(long)]
        username: Option<String>,
        /// OAuth provider base URL
        #[arg(long)]
        provider_url: Option<String>,
    },
    /// Show who is signed in on the current profile
    Status,
    /// Clear the stored session
    Logout,
}

pub async fn auth_command(args: AuthCommands) -> Result<()> {
    match args.command {
        AuthSubcommands::Login {
            username,
            provider_url,
        } => login_command(username, provider_url).await,
        AuthSubcommands::Status => status_command().await,
        AuthSubcommands::Logout => logout_command().await,
    }
}

async fn login_command(username: Option<String>, provider_url: Option<String>) -> Result<()> {
    let profile = current_profile().await?;

    let username = match username {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Username").interact_text()?,
    };
    let password = rpassword::prompt_password("Password: ")?;

    let provider_url = provider_url
        .or_else(|| std::env::var("AVALIAI_PROVIDER_URL").ok())
        .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string());

    let auth = AuthClient::new(provider_url, profile.host.clone());
    let tokens = with_spinner("Signing in...", auth.login(&username, &password)).await?;

    // One-time bridge call; a failure is logged inside, never fatal.
    auth.register_with_backend(&tokens.access_token).await?;

    crate::global_config()
        .save_session(
            &profile.name,
            Session {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                username: Some(username.clone()),
                obtained_at: Utc::now(),
            },
        )
        .await?;

    println!(
        "{} Signed in to '{}' as {}",
        "✓".bright_green(),
        profile.name.bright_green().bold(),
        username.cyan()
    );
    Ok(())
}

async fn status_command() -> Result<()> {
    let profile = current_profile().await?;

    match crate::global_config().get_session(&profile.name).await? {
        Some(session) => {
            println!(
                "Signed in to '{}' as {} (since {})",
                profile.name.bright_green().bold(),
                session.username.as_deref().unwrap_or("<unknown>").cyan(),
                session.obtained_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
        None => {
            println!(
                "Not signed in to '{}'. Run {}.",
                profile.name.bold(),
                "avaliai-cli auth login".yellow()
            );
        }
    }
    Ok(())
}

async fn logout_command() -> Result<()> {
    let profile = current_profile().await?;

    // Make sure there is something to clear so the message is honest.
    let session = require_session(&profile).await;
    crate::global_config().clear_session(&profile.name).await?;

    match session {
        Ok(_) => println!("{} Signed out of '{}'", "✓".bright_green(), profile.name),
        Err(_) => println!("No session stored for '{}'", profile.name),
    }
    Ok(())
}
