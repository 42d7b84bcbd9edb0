//! Exam commands

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use dialoguer::Confirm;
use uuid::Uuid;

use crate::api::{Difficulty, Exam, ExamStatus};
use crate::cli::ui::with_spinner;

use super::{api_client, require_session};

#[derive(Args)]
pub struct ExamCommands {
    #[command(subcommand)]
    pub command: ExamSubcommands,
}

#[derive(Subcommand)]
pub enum ExamSubcommands {
    /// List the educator's exams
    List,
    /// Show one exam with its questions
    Show { id: Uuid },
    /// Create a draft exam
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        theme: String,
        /// easy | medium | hard
        #[arg(long, default_value = "medium")]
        difficulty: String,
        #[arg(long)]
        discipline: Option<Uuid>,
        #[arg(long)]
        classroom: Option<Uuid>,
    },
    /// Mark an exam as applied
    Apply { id: Uuid },
    /// Delete an exam
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn exam_command(args: ExamCommands) -> Result<()> {
    let (profile, client) = api_client().await?;
    require_session(&profile).await?;

    match args.command {
        ExamSubcommands::List => {
            let exams = with_spinner("Fetching exams...", client.list_exams()).await?;
            if exams.is_empty() {
                println!("No exams yet.");
                return Ok(());
            }
            for exam in exams {
                println!(
                    "{}  {}  [{}] {} {}",
                    exam.id.to_string().dimmed(),
                    exam.title.bold(),
                    exam.status.to_string().yellow(),
                    exam.difficulty,
                    format!("({} questões)", exam.questions.len()).dimmed()
                );
            }
        }
        ExamSubcommands::Show { id } => {
            let exam = with_spinner("Fetching exam...", client.get_exam(id)).await?;
            print_exam(&exam);
        }
        ExamSubcommands::Create {
            title,
            description,
            theme,
            difficulty,
            discipline,
            classroom,
        } => {
            let exam = Exam {
                id: Uuid::new_v4(),
                title,
                description,
                theme,
                discipline_id: discipline,
                classroom_id: classroom,
                difficulty: parse_difficulty(&difficulty)?,
                status: ExamStatus::Draft,
                questions: Vec::new(),
            };
            let created = with_spinner("Creating exam...", client.create_exam(&exam)).await?;
            println!(
                "{} Created exam '{}' ({})",
                "✓".bright_green(),
                created.title.bold(),
                created.id
            );
        }
        ExamSubcommands::Apply { id } => {
            let exam = with_spinner("Applying exam...", client.apply_exam(id)).await?;
            println!(
                "{} Exam '{}' is now {}",
                "✓".bright_green(),
                exam.title.bold(),
                exam.status.to_string().yellow()
            );
        }
        ExamSubcommands::Delete { id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete exam {}?", id))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("Aborted.");
                    return Ok(());
                }
            }
            with_spinner("Deleting exam...", client.delete_exam(id)).await?;
            println!("{} Deleted exam {}", "✓".bright_green(), id);
        }
    }

    Ok(())
}

fn print_exam(exam: &Exam) {
    println!("{}", exam.title.bold());
    if !exam.description.is_empty() {
        println!("{}", exam.description);
    }
    println!(
        "status: {} | dificuldade: {} | tema: {}",
        exam.status.to_string().yellow(),
        exam.difficulty,
        if exam.theme.is_empty() { "-" } else { exam.theme.as_str() }
    );
    println!();
    for (position, question) in exam.questions.iter().enumerate() {
        println!(
            "{}. [{}] {} {}",
            position + 1,
            question.kind,
            question.title,
            format!("({} pts, {})", question.points, question.id).dimmed()
        );
        for (index, option) in question.options.iter().enumerate() {
            let marker = if index == question.answer { "✓" } else { " " };
            println!("   {} {}", marker, option);
        }
    }
}

pub(crate) fn parse_difficulty(raw: &str) -> Result<Difficulty> {
    match raw.to_lowercase().as_str() {
        "easy" | "facil" | "fácil" => Ok(Difficulty::Easy),
        "medium" | "media" | "média" => Ok(Difficulty::Medium),
        "hard" | "dificil" | "difícil" => Ok(Difficulty::Hard),
        other => anyhow::bail!("Unknown difficulty '{}' (use easy, medium, or hard)", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty_accepts_both_languages() {
        assert_eq!(parse_difficulty("easy").unwrap(), Difficulty::Easy);
        assert_eq!(parse_difficulty("Média").unwrap(), Difficulty::Medium);
        assert_eq!(parse_difficulty("dificil").unwrap(), Difficulty::Hard);
        assert!(parse_difficulty("impossible").is_err());
    }
}
