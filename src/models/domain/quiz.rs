use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,       // Set at build time, unique index in the store
    pub question: String, // Required, non-empty
    pub answer: String,   // Required, non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(question: &str, answer: &str) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    /// Mutates question/answer in place and bumps the modified timestamp.
    pub fn apply_edit(&mut self, question: &str, answer: &str) {
        self.question = question.to_string();
        self.answer = answer.to_string();
        self.modified_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_quiz_has_unique_id_and_timestamps() {
        let a = Quiz::new("Capital of France", "Paris");
        let b = Quiz::new("Capital of France", "Paris");

        assert_ne!(a.id, b.id);
        assert!(a.created_at.is_some());
        assert!(a.modified_at.is_some());
        assert_eq!(a.question, "Capital of France");
        assert_eq!(a.answer, "Paris");
    }

    #[test]
    fn test_apply_edit_touches_modified_at_only() {
        let mut quiz = Quiz::new("q", "a");
        let created = quiz.created_at;

        quiz.apply_edit("q2", "a2");

        assert_eq!(quiz.question, "q2");
        assert_eq!(quiz.answer, "a2");
        assert_eq!(quiz.created_at, created);
    }
}
