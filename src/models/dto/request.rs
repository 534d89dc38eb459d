use serde::Deserialize;
use validator::Validate;

/// Decoded multipart quiz form: the two text fields plus an optional image part.
#[derive(Debug, Clone, Validate)]
pub struct QuizForm {
    #[validate(length(min = 1, message = "Question must not be empty"))]
    pub question: String,

    #[validate(length(min = 1, message = "Answer must not be empty"))]
    pub answer: String,

    pub upload: Option<UploadedImage>,
}

impl QuizForm {
    pub fn new(question: String, answer: String, upload: Option<UploadedImage>) -> Self {
        Self {
            question,
            answer,
            upload,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// `?answer=` query value for the play/check views; absent means empty.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerQuery {
    #[serde(default)]
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_fail_validation() {
        let form = QuizForm::new("".to_string(), "".to_string(), None);
        let errors = form.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("question"));
        assert!(errors.field_errors().contains_key("answer"));
    }

    #[test]
    fn test_filled_form_passes_validation() {
        let form = QuizForm::new("q".to_string(), "a".to_string(), None);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_answer_query_defaults_to_empty() {
        let query = actix_web::web::Query::<AnswerQuery>::from_query("").unwrap();
        assert_eq!(query.answer, "");
    }

    #[test]
    fn test_answer_query_reads_url_encoded_value() {
        let query =
            actix_web::web::Query::<AnswerQuery>::from_query("answer=Par%20is").unwrap();
        assert_eq!(query.answer, "Par is");
    }
}
