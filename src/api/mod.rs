//! Backend API layer: transport, session-aware client, typed resources.

pub mod client;
pub mod error;
pub mod models;
pub mod resources;
pub mod transport;

pub use client::{ApiClient, REFRESH_TOKEN_PATH};
pub use error::{ApiError, StatusClass};
pub use models::{
    Classroom, Difficulty, Discipline, Exam, ExamStatus, Question, QuestionKind, Tag,
};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
