use clap::{Parser, Subcommand};

use super::commands::auth::AuthCommands;
use super::commands::catalog::{ClassroomCommands, DisciplineCommands, TagCommands};
use super::commands::exam::ExamCommands;
use super::commands::profile::ProfileCommands;
use super::commands::question::QuestionCommands;
use super::commands::raw::RawCommands;

#[derive(Parser)]
#[command(name = "avaliai-cli")]
#[command(about = "A CLI front-end for the AvaliAi exam-authoring platform")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, inspect, or clear the local session
    Auth(AuthCommands),
    /// Manage backend profiles (named base URLs)
    Profile(ProfileCommands),
    /// List, create, apply, and delete exams
    Exam(ExamCommands),
    /// Edit an exam's question collection
    Question(QuestionCommands),
    /// List disciplines
    Discipline(DisciplineCommands),
    /// List classrooms
    Classroom(ClassroomCommands),
    /// List tags
    Tag(TagCommands),
    /// Execute raw authenticated HTTP requests against the backend
    Raw(RawCommands),
}
