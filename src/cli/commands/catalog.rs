//! Read-only catalog listings: disciplines, classrooms, tags

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::cli::ui::with_spinner;

use super::{api_client, require_session};

#[derive(Args)]
pub struct DisciplineCommands {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Args)]
pub struct ClassroomCommands {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Args)]
pub struct TagCommands {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Subcommand)]
pub enum ListSubcommand {
    /// List entries
    List,
}

pub async fn discipline_command(args: DisciplineCommands) -> Result<()> {
    let ListSubcommand::List = args.command;
    let (profile, client) = api_client().await?;
    require_session(&profile).await?;

    let disciplines =
        with_spinner("Fetching disciplines...", client.list_disciplines()).await?;
    for discipline in disciplines {
        let code = if discipline.code.is_empty() {
            String::new()
        } else {
            format!("  [{}]", discipline.code)
        };
        println!(
            "{}  {}{}",
            discipline.id.to_string().dimmed(),
            discipline.name.bold(),
            code.dimmed()
        );
    }
    Ok(())
}

pub async fn classroom_command(args: ClassroomCommands) -> Result<()> {
    let ListSubcommand::List = args.command;
    let (profile, client) = api_client().await?;
    require_session(&profile).await?;

    let classrooms = with_spinner("Fetching classrooms...", client.list_classrooms()).await?;
    for classroom in classrooms {
        let year = classroom
            .year
            .map(|y| format!("  ({})", y))
            .unwrap_or_default();
        println!(
            "{}  {}{}",
            classroom.id.to_string().dimmed(),
            classroom.name.bold(),
            year.dimmed()
        );
    }
    Ok(())
}

pub async fn tag_command(args: TagCommands) -> Result<()> {
    let ListSubcommand::List = args.command;
    let (profile, client) = api_client().await?;
    require_session(&profile).await?;

    let tags = with_spinner("Fetching tags...", client.list_tags()).await?;
    for tag in tags {
        println!("{}  {}", tag.id.to_string().dimmed(), tag.name);
    }
    Ok(())
}
