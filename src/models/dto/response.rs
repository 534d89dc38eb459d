use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::ValidationErrors;

use crate::models::domain::{Attachment, Quiz};

/// Quiz payload rendered to clients; attachment bytes are never inlined,
/// only the metadata needed to build the image URL.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachmentInfo {
    pub id: String,
    pub mime: String,
}

impl QuizResponse {
    pub fn from_quiz(quiz: Quiz, attachment: Option<&Attachment>) -> Self {
        QuizResponse {
            id: quiz.id,
            question: quiz.question,
            answer: quiz.answer,
            created_at: quiz.created_at,
            modified_at: quiz.modified_at,
            attachment: attachment.map(|a| AttachmentInfo {
                id: a.id.clone(),
                mime: a.mime.clone(),
            }),
        }
    }
}

/// Blank form payload for `GET /quizzes/new`.
#[derive(Debug, Clone, Serialize)]
pub struct NewQuizResponse {
    pub question: String,
    pub answer: String,
}

impl Default for NewQuizResponse {
    fn default() -> Self {
        NewQuizResponse {
            question: String::new(),
            answer: String::new(),
        }
    }
}

/// Play view: the quiz plus whatever the caller already typed.
#[derive(Debug, Clone, Serialize)]
pub struct PlayResponse {
    pub quiz: QuizResponse,
    pub answer: String,
}

/// Check view: the graded result alongside the submitted answer.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    pub quiz: QuizResponse,
    pub answer: String,
    pub result: bool,
}

/// Echo of an unsaved record, rendered back when validation fails so the
/// caller can re-populate the form with what was typed.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationFailureResponse {
    pub quiz: QuizResponse,
    pub errors: ValidationErrors,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn test_quiz_response_without_attachment() {
        let quiz = fixtures::test_quiz();
        let response = QuizResponse::from_quiz(quiz.clone(), None);

        assert_eq!(response.id, quiz.id);
        assert_eq!(response.question, quiz.question);
        assert!(response.attachment.is_none());
    }

    #[test]
    fn test_quiz_response_with_attachment_carries_metadata_only() {
        let quiz = fixtures::test_quiz();
        let attachment = fixtures::test_attachment(&quiz.id);
        let response = QuizResponse::from_quiz(quiz, Some(&attachment));

        let info = response.attachment.clone().expect("attachment metadata");
        assert_eq!(info.id, attachment.id);
        assert_eq!(info.mime, attachment.mime);

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"image\":"));
    }

    #[test]
    fn test_new_quiz_response_is_blank() {
        let response = NewQuizResponse::default();
        assert_eq!(response.question, "");
        assert_eq!(response.answer, "");
    }
}
