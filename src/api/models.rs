//! Wire models for the AvaliAi backend resources
//!
//! The backend owns validation and persistence; these types only mirror the
//! JSON it exchanges. Fields the editor never interprets (author, creation
//! timestamp, AI flag, tag list) are carried as opaque pass-through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Question variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    Essay,
}

impl QuestionKind {
    /// Option list a freshly added question of this kind starts with.
    pub fn default_options(&self) -> Vec<String> {
        match self {
            QuestionKind::MultipleChoice => vec![String::new(); 4],
            QuestionKind::TrueFalse => {
                vec!["Verdadeiro".to_string(), "Falso".to_string()]
            }
            QuestionKind::Essay => Vec::new(),
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            QuestionKind::MultipleChoice => "Múltipla escolha",
            QuestionKind::TrueFalse => "Verdadeiro ou falso",
            QuestionKind::Essay => "Discursiva",
        };
        write!(f, "{}", label)
    }
}

/// One gradable item of an exam.
///
/// Invariant: for `MultipleChoice` and `TrueFalse`, `answer` indexes into
/// `options`; for `Essay`, `options` is empty and grading uses
/// `answer_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Client-generated until the backend confirms a durable id.
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: usize,
    #[serde(default)]
    pub answer_text: String,
    pub points: u32,
    pub kind: QuestionKind,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ai_generated: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Question {
    /// Fresh local question with the kind's default option list and the
    /// default score of 10.
    pub fn new(kind: QuestionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            options: kind.default_options(),
            answer: 0,
            answer_text: String::new(),
            points: 10,
            kind,
            author: None,
            created_at: None,
            ai_generated: false,
            tags: Vec::new(),
        }
    }
}

/// Lifecycle of an exam as the backend reports it.
///
/// One canonical representation: uppercase English tags on the wire,
/// Portuguese only for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamStatus {
    Draft,
    Applied,
    Corrected,
    Archived,
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ExamStatus::Draft => "Rascunho",
            ExamStatus::Applied => "Aplicada",
            ExamStatus::Corrected => "Corrigida",
            ExamStatus::Archived => "Arquivada",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Difficulty::Easy => "Fácil",
            Difficulty::Medium => "Média",
            Difficulty::Hard => "Difícil",
        };
        write!(f, "{}", label)
    }
}

/// Exam aggregate: metadata plus an ordered question list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub discipline_id: Option<Uuid>,
    #[serde(default)]
    pub classroom_id: Option<Uuid>,
    pub difficulty: Difficulty,
    pub status: ExamStatus,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discipline {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}
