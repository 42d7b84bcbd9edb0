//! In-memory question-collection editor
//!
//! Holds the ordered question list a user assembles before anything is
//! submitted to the backend. Operations are synchronous and infallible:
//! the UI only ever passes identifiers it just rendered, so an unknown id
//! is absorbed as a no-op rather than surfaced as an error. Insertion
//! order is preserved; new and duplicated questions append at the end.

use uuid::Uuid;

use crate::api::models::{Question, QuestionKind};

#[derive(Debug, Default)]
pub struct QuestionEditor {
    questions: Vec<Question>,
}

impl QuestionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an exam's existing question list.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Append a fresh question of the given kind and return its id.
    pub fn add(&mut self, kind: QuestionKind) -> Uuid {
        let question = Question::new(kind);
        let id = question.id;
        self.questions.push(question);
        id
    }

    /// Delete the matching question. Unknown id: no-op.
    pub fn remove(&mut self, id: Uuid) {
        self.questions.retain(|q| q.id != id);
    }

    /// Append a value-copy of the matching question under a new id and
    /// return that id. Unknown id: no-op.
    pub fn duplicate(&mut self, id: Uuid) -> Option<Uuid> {
        let mut copy = self.get(id)?.clone();
        copy.id = Uuid::new_v4();
        let new_id = copy.id;
        self.questions.push(copy);
        Some(new_id)
    }

    pub fn update_text(&mut self, id: Uuid, text: &str) {
        if let Some(question) = self.get_mut(id) {
            question.title = text.to_string();
        }
    }

    /// Replace one option string. The editor never grows the option list;
    /// an out-of-bounds index is ignored.
    pub fn update_option(&mut self, id: Uuid, index: usize, text: &str) {
        if let Some(question) = self.get_mut(id) {
            if let Some(option) = question.options.get_mut(index) {
                *option = text.to_string();
            }
        }
    }

    /// Parse the raw point input, falling back to 1 on any parse failure.
    /// The fallback-to-1 default is part of the contract.
    pub fn update_points(&mut self, id: Uuid, raw: &str) {
        if let Some(question) = self.get_mut(id) {
            question.points = raw.trim().parse().unwrap_or(1);
        }
    }

    /// Replace the correct-option index. Bounds are the caller's problem:
    /// the UI only offers indices of options it rendered.
    pub fn update_answer(&mut self, id: Uuid, answer: usize) {
        if let Some(question) = self.get_mut(id) {
            question.answer = answer;
        }
    }

    pub fn update_answer_text(&mut self, id: Uuid, text: &str) {
        if let Some(question) = self.get_mut(id) {
            question.answer_text = text.to_string();
        }
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Value equality that ignores identifiers.
    fn values_ignoring_ids(editor: &QuestionEditor) -> Vec<Question> {
        editor
            .questions()
            .iter()
            .map(|q| {
                let mut q = q.clone();
                q.id = Uuid::nil();
                q
            })
            .collect()
    }

    #[test]
    fn test_add_applies_type_defaults() {
        let mut editor = QuestionEditor::new();
        let mc = editor.add(QuestionKind::MultipleChoice);
        let tf = editor.add(QuestionKind::TrueFalse);
        let es = editor.add(QuestionKind::Essay);

        assert_eq!(editor.len(), 3);
        assert_eq!(editor.get(mc).unwrap().options, vec!["", "", "", ""]);
        assert_eq!(
            editor.get(tf).unwrap().options,
            vec!["Verdadeiro", "Falso"]
        );
        assert!(editor.get(es).unwrap().options.is_empty());
        for q in editor.questions() {
            assert_eq!(q.points, 10);
        }
    }

    #[test]
    fn test_add_sequence_length_matches_calls() {
        let mut editor = QuestionEditor::new();
        let kinds = [
            QuestionKind::MultipleChoice,
            QuestionKind::Essay,
            QuestionKind::TrueFalse,
            QuestionKind::MultipleChoice,
            QuestionKind::Essay,
        ];
        for kind in kinds {
            editor.add(kind);
        }
        assert_eq!(editor.len(), kinds.len());
    }

    #[test]
    fn test_duplicate_then_remove_restores_collection() {
        let mut editor = QuestionEditor::new();
        let a = editor.add(QuestionKind::MultipleChoice);
        let b = editor.add(QuestionKind::Essay);
        editor.update_text(a, "Questão A");
        editor.update_text(b, "Questão B");
        editor.update_option(a, 0, "alternativa 1");

        let before = values_ignoring_ids(&editor);
        let copy = editor.duplicate(a).unwrap();
        assert_eq!(editor.len(), 3);
        assert_ne!(copy, a);
        assert_eq!(
            editor.get(copy).unwrap().title,
            editor.get(a).unwrap().title
        );

        editor.remove(copy);
        assert_eq!(values_ignoring_ids(&editor), before);
    }

    #[test]
    fn test_duplicate_preserves_every_field_but_id() {
        let mut editor = QuestionEditor::new();
        let id = editor.add(QuestionKind::TrueFalse);
        editor.update_text(id, "Natal é a capital do RN?");
        editor.update_points(id, "25");
        editor.update_answer(id, 0);

        let copy = editor.duplicate(id).unwrap();
        let original = editor.get(id).unwrap().clone();
        let duplicated = editor.get(copy).unwrap().clone();

        assert_ne!(duplicated.id, original.id);
        let mut normalized = duplicated;
        normalized.id = original.id;
        assert_eq!(normalized, original);
    }

    #[test]
    fn test_points_parse_fallback_to_one() {
        let mut editor = QuestionEditor::new();
        let id = editor.add(QuestionKind::MultipleChoice);

        editor.update_points(id, "abc");
        assert_eq!(editor.get(id).unwrap().points, 1);

        editor.update_points(id, "7");
        assert_eq!(editor.get(id).unwrap().points, 7);

        editor.update_points(id, "");
        assert_eq!(editor.get(id).unwrap().points, 1);
    }

    #[test]
    fn test_unknown_id_operations_are_noops() {
        let mut editor = QuestionEditor::new();
        editor.add(QuestionKind::Essay);
        let before = editor.questions().to_vec();

        let unknown = Uuid::new_v4();
        editor.remove(unknown);
        editor.update_text(unknown, "x");
        editor.update_option(unknown, 0, "x");
        editor.update_points(unknown, "99");
        editor.update_answer(unknown, 2);
        assert!(editor.duplicate(unknown).is_none());

        assert_eq!(editor.questions(), before.as_slice());
    }

    #[test]
    fn test_update_option_ignores_out_of_bounds_index() {
        let mut editor = QuestionEditor::new();
        let id = editor.add(QuestionKind::TrueFalse);
        editor.update_option(id, 5, "fora");
        assert_eq!(
            editor.get(id).unwrap().options,
            vec!["Verdadeiro", "Falso"]
        );
    }

    #[test]
    fn test_operations_preserve_relative_order() {
        let mut editor = QuestionEditor::new();
        let a = editor.add(QuestionKind::MultipleChoice);
        let b = editor.add(QuestionKind::TrueFalse);
        let c = editor.add(QuestionKind::Essay);
        editor.update_text(a, "primeira");
        editor.update_text(b, "segunda");
        editor.update_text(c, "terceira");

        editor.remove(b);
        let titles: Vec<_> = editor.questions().iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["primeira", "terceira"]);

        editor.duplicate(a);
        let titles: Vec<_> = editor.questions().iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["primeira", "terceira", "primeira"]);
    }
}
