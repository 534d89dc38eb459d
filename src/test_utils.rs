use crate::models::domain::{Attachment, Quiz};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard test quiz
    pub fn test_quiz() -> Quiz {
        Quiz::new("Capital of France", "Paris")
    }

    /// Creates a test quiz with custom question/answer
    pub fn test_quiz_with(question: &str, answer: &str) -> Quiz {
        Quiz::new(question, answer)
    }

    /// Creates a small PNG-flavoured attachment for the given quiz
    pub fn test_attachment(quiz_id: &str) -> Attachment {
        Attachment::new(quiz_id, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_quiz() {
        let quiz = test_quiz();
        assert_eq!(quiz.question, "Capital of France");
        assert_eq!(quiz.answer, "Paris");
    }

    #[test]
    fn test_fixtures_test_attachment_links_quiz() {
        let quiz = test_quiz_with("q", "a");
        let attachment = test_attachment(&quiz.id);
        assert_eq!(attachment.quiz_id, quiz.id);
        assert!(attachment.has_image());
    }
}
