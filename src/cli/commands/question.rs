//! Question commands
//!
//! These drive the in-memory editor against a fetched exam before anything
//! is persisted: flags map one-to-one onto editor operations, and only the
//! final state is submitted.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use uuid::Uuid;

use crate::api::{Question, QuestionKind};
use crate::cli::ui::with_spinner;
use crate::editor::QuestionEditor;

use super::{api_client, require_session};

#[derive(Args)]
pub struct QuestionCommands {
    #[command(subcommand)]
    pub command: QuestionSubcommands,
}

#[derive(Args, Default)]
pub struct FieldUpdates {
    /// Question statement
    #[arg(long)]
    title: Option<String>,
    /// Replace an option, formatted as INDEX=TEXT (repeatable)
    #[arg(long, value_name = "INDEX=TEXT")]
    option: Vec<String>,
    /// Point value; non-numeric input falls back to 1
    #[arg(long)]
    points: Option<String>,
    /// Index of the correct option
    #[arg(long)]
    answer: Option<usize>,
    /// Expected answer for essay questions
    #[arg(long)]
    answer_text: Option<String>,
}

#[derive(Subcommand)]
pub enum QuestionSubcommands {
    /// List questions, optionally scoped to one exam
    List {
        #[arg(long)]
        exam: Option<Uuid>,
    },
    /// Add a question to an exam
    Add {
        #[arg(long)]
        exam: Uuid,
        /// mc | tf | essay
        #[arg(long)]
        kind: String,
        #[command(flatten)]
        fields: FieldUpdates,
    },
    /// Edit an existing question
    Edit {
        id: Uuid,
        #[command(flatten)]
        fields: FieldUpdates,
    },
    /// Duplicate a question within an exam
    Duplicate {
        id: Uuid,
        #[arg(long)]
        exam: Uuid,
    },
    /// Remove a question
    Remove { id: Uuid },
}

pub async fn question_command(args: QuestionCommands) -> Result<()> {
    let (profile, client) = api_client().await?;
    require_session(&profile).await?;

    match args.command {
        QuestionSubcommands::List { exam } => {
            let questions =
                with_spinner("Fetching questions...", client.list_questions(exam)).await?;
            if questions.is_empty() {
                println!("No questions found.");
                return Ok(());
            }
            for question in questions {
                println!(
                    "{}  [{}] {} {}",
                    question.id.to_string().dimmed(),
                    question.kind,
                    question.title,
                    format!("({} pts)", question.points).dimmed()
                );
            }
        }
        QuestionSubcommands::Add { exam, kind, fields } => {
            let kind = parse_kind(&kind)?;
            let fetched = with_spinner("Fetching exam...", client.get_exam(exam)).await?;

            let mut editor = QuestionEditor::from_questions(fetched.questions);
            let id = editor.add(kind);
            apply_fields(&mut editor, id, &fields)?;

            let question = editor
                .get(id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Editor lost the new question"))?;
            let created = with_spinner(
                "Submitting question...",
                client.create_question(exam, &question),
            )
            .await?;

            println!(
                "{} Added {} question to '{}' ({})",
                "✓".bright_green(),
                created.kind,
                fetched.title.bold(),
                created.id
            );
        }
        QuestionSubcommands::Edit { id, fields } => {
            let question = with_spinner("Fetching question...", client.get_question(id)).await?;

            let mut editor = QuestionEditor::from_questions(vec![question]);
            apply_fields(&mut editor, id, &fields)?;

            let updated = editor
                .get(id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Editor lost the question being edited"))?;
            with_spinner("Submitting changes...", client.update_question(&updated)).await?;
            println!("{} Updated question {}", "✓".bright_green(), id);
        }
        QuestionSubcommands::Duplicate { id, exam } => {
            let question = with_spinner("Fetching question...", client.get_question(id)).await?;

            let mut editor = QuestionEditor::from_questions(vec![question]);
            let copy_id = editor
                .duplicate(id)
                .ok_or_else(|| anyhow::anyhow!("Question {} not found in editor", id))?;
            let copy = editor
                .get(copy_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Editor lost the duplicated question"))?;

            let created =
                with_spinner("Submitting copy...", client.create_question(exam, &copy)).await?;
            println!(
                "{} Duplicated question {} as {}",
                "✓".bright_green(),
                id,
                created.id
            );
        }
        QuestionSubcommands::Remove { id } => {
            with_spinner("Deleting question...", client.delete_question(id)).await?;
            println!("{} Removed question {}", "✓".bright_green(), id);
        }
    }

    Ok(())
}

/// Map the optional flags onto editor operations.
fn apply_fields(editor: &mut QuestionEditor, id: Uuid, fields: &FieldUpdates) -> Result<()> {
    if let Some(title) = &fields.title {
        editor.update_text(id, title);
    }
    for spec in &fields.option {
        let (index, text) = parse_option_spec(spec)?;
        validate_option_index(editor.get(id), index)?;
        editor.update_option(id, index, text);
    }
    if let Some(points) = &fields.points {
        editor.update_points(id, points);
    }
    if let Some(answer) = fields.answer {
        validate_option_index(editor.get(id), answer)?;
        editor.update_answer(id, answer);
    }
    if let Some(answer_text) = &fields.answer_text {
        editor.update_answer_text(id, answer_text);
    }
    Ok(())
}

/// The editor leaves bounds to its caller; the CLI is that caller, so it
/// rejects indices the question does not have before they reach the editor.
fn validate_option_index(question: Option<&Question>, index: usize) -> Result<()> {
    let count = question.map(|q| q.options.len()).unwrap_or(0);
    if index >= count {
        anyhow::bail!(
            "Option index {} out of bounds (question has {} options)",
            index,
            count
        );
    }
    Ok(())
}

fn parse_option_spec(spec: &str) -> Result<(usize, &str)> {
    let (index, text) = spec
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Option must be formatted as INDEX=TEXT, got '{}'", spec))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid option index in '{}'", spec))?;
    Ok((index, text))
}

pub(crate) fn parse_kind(raw: &str) -> Result<QuestionKind> {
    match raw.to_lowercase().as_str() {
        "mc" | "multiple-choice" | "multipla-escolha" => Ok(QuestionKind::MultipleChoice),
        "tf" | "true-false" | "verdadeiro-falso" => Ok(QuestionKind::TrueFalse),
        "essay" | "discursiva" => Ok(QuestionKind::Essay),
        other => anyhow::bail!("Unknown question kind '{}' (use mc, tf, or essay)", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("mc").unwrap(), QuestionKind::MultipleChoice);
        assert_eq!(parse_kind("TF").unwrap(), QuestionKind::TrueFalse);
        assert_eq!(parse_kind("essay").unwrap(), QuestionKind::Essay);
        assert!(parse_kind("sim").is_err());
    }

    #[test]
    fn test_parse_option_spec() {
        assert_eq!(parse_option_spec("2=Natal").unwrap(), (2, "Natal"));
        assert_eq!(parse_option_spec("0=").unwrap(), (0, ""));
        assert!(parse_option_spec("Natal").is_err());
        assert!(parse_option_spec("x=Natal").is_err());
    }

    #[test]
    fn test_apply_fields_routes_to_editor() {
        let mut editor = QuestionEditor::new();
        let id = editor.add(QuestionKind::MultipleChoice);

        let fields = FieldUpdates {
            title: Some("Capital do RN?".to_string()),
            option: vec!["0=Natal".to_string(), "1=Mossoró".to_string()],
            points: Some("abc".to_string()),
            answer: Some(0),
            answer_text: None,
        };
        apply_fields(&mut editor, id, &fields).unwrap();

        let question = editor.get(id).unwrap();
        assert_eq!(question.title, "Capital do RN?");
        assert_eq!(question.options[0], "Natal");
        assert_eq!(question.options[1], "Mossoró");
        assert_eq!(question.points, 1); // parse fallback
        assert_eq!(question.answer, 0);
    }

    #[test]
    fn test_apply_fields_rejects_out_of_bounds_option() {
        let mut editor = QuestionEditor::new();
        let id = editor.add(QuestionKind::TrueFalse);

        let fields = FieldUpdates {
            option: vec!["5=fora".to_string()],
            ..Default::default()
        };
        assert!(apply_fields(&mut editor, id, &fields).is_err());
    }
}
