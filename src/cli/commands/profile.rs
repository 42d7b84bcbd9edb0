//! Backend profile management commands

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::config::Profile;

#[derive(Args)]
pub struct ProfileCommands {
    #[command(subcommand)]
    pub command: ProfileSubcommands,
}

#[derive(Subcommand)]
pub enum ProfileSubcommands {
    /// Register a backend deployment under a name
    Add {
        name: String,
        /// Backend base URL, e.g. https://api.avaliai.example
        host: String,
    },
    /// List registered profiles
    List,
    /// Make a profile the default for all commands
    Select { name: String },
    /// Remove a profile and its stored session
    Remove { name: String },
}

pub async fn profile_command(args: ProfileCommands) -> Result<()> {
    let config = crate::global_config();

    match args.command {
        ProfileSubcommands::Add { name, host } => {
            config
                .add_profile(Profile {
                    name: name.clone(),
                    host: host.trim_end_matches('/').to_string(),
                })
                .await?;

            // First profile becomes current automatically.
            if config.current_profile().await?.is_none() {
                config.set_current_profile(&name).await?;
            }

            println!("{} Added profile '{}'", "✓".bright_green(), name);
        }
        ProfileSubcommands::List => {
            let profiles = config.list_profiles().await?;
            if profiles.is_empty() {
                println!("No profiles yet. Add one with 'avaliai-cli profile add'.");
                return Ok(());
            }

            let current = config.current_profile().await?.map(|p| p.name);
            for profile in profiles {
                let marker = if current.as_deref() == Some(&profile.name) {
                    "*".bright_green()
                } else {
                    " ".normal()
                };
                println!("{} {}  {}", marker, profile.name.bold(), profile.host.dimmed());
            }
        }
        ProfileSubcommands::Select { name } => {
            config.set_current_profile(&name).await?;
            println!("{} Selected profile '{}'", "✓".bright_green(), name);
        }
        ProfileSubcommands::Remove { name } => {
            config.remove_profile(&name).await?;
            println!("{} Removed profile '{}'", "✓".bright_green(), name);
        }
    }

    Ok(())
}
