//! Typed wrappers over the backend's REST resources
//!
//! The client does not interpret these payloads beyond deserializing them
//! into the models; validation and persistence are the backend's job.

use anyhow::{Context, Result};
use serde_json::json;
use uuid::Uuid;

use super::client::ApiClient;
use super::models::{Classroom, Discipline, Exam, ExamStatus, Question, Tag};

impl ApiClient {
    // Exams

    pub async fn list_exams(&self) -> Result<Vec<Exam>> {
        let body = self.get("/exams/").await?;
        serde_json::from_value(body).context("Failed to parse exam list")
    }

    pub async fn get_exam(&self, id: Uuid) -> Result<Exam> {
        let body = self.get(&format!("/exams/{}/", id)).await?;
        serde_json::from_value(body).with_context(|| format!("Failed to parse exam {}", id))
    }

    pub async fn create_exam(&self, exam: &Exam) -> Result<Exam> {
        let body = self.post("/exams/", serde_json::to_value(exam)?).await?;
        serde_json::from_value(body).context("Failed to parse created exam")
    }

    pub async fn delete_exam(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/exams/{}/", id)).await?;
        Ok(())
    }

    /// Flip an exam to `Applied`. The backend owns the validity check.
    pub async fn apply_exam(&self, id: Uuid) -> Result<Exam> {
        let body = self
            .patch(
                &format!("/exams/{}/", id),
                json!({ "status": ExamStatus::Applied }),
            )
            .await?;
        serde_json::from_value(body).context("Failed to parse applied exam")
    }

    // Questions

    pub async fn list_questions(&self, exam_id: Option<Uuid>) -> Result<Vec<Question>> {
        let path = match exam_id {
            Some(id) => format!("/questions/?exam={}", id),
            None => "/questions/".to_string(),
        };
        let body = self.get(&path).await?;
        serde_json::from_value(body).context("Failed to parse question list")
    }

    pub async fn get_question(&self, id: Uuid) -> Result<Question> {
        let body = self.get(&format!("/questions/{}/", id)).await?;
        serde_json::from_value(body).with_context(|| format!("Failed to parse question {}", id))
    }

    pub async fn create_question(&self, exam_id: Uuid, question: &Question) -> Result<Question> {
        let mut payload = serde_json::to_value(question)?;
        payload["exam"] = json!(exam_id);
        let body = self.post("/questions/", payload).await?;
        serde_json::from_value(body).context("Failed to parse created question")
    }

    pub async fn update_question(&self, question: &Question) -> Result<Question> {
        let body = self
            .put(
                &format!("/questions/{}/", question.id),
                serde_json::to_value(question)?,
            )
            .await?;
        serde_json::from_value(body).context("Failed to parse updated question")
    }

    pub async fn delete_question(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/questions/{}/", id)).await?;
        Ok(())
    }

    // Read-only catalogs

    pub async fn list_disciplines(&self) -> Result<Vec<Discipline>> {
        let body = self.get("/disciplines/").await?;
        serde_json::from_value(body).context("Failed to parse discipline list")
    }

    pub async fn list_classrooms(&self) -> Result<Vec<Classroom>> {
        let body = self.get("/classrooms/").await?;
        serde_json::from_value(body).context("Failed to parse classroom list")
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let body = self.get("/tags/").await?;
        serde_json::from_value(body).context("Failed to parse tag list")
    }
}
