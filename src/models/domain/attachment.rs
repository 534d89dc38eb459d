use chrono::{DateTime, Utc};
use mongodb::bson::{spec::BinarySubtype, Binary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Binary image owned by exactly one quiz (unique index on `quiz_id`).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Attachment {
    pub id: String,
    pub mime: String,
    pub image: Binary,
    pub quiz_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Attachment {
    pub fn new(quiz_id: &str, mime: &str, bytes: Vec<u8>) -> Self {
        Attachment {
            id: Uuid::new_v4().to_string(),
            mime: mime.to_string(),
            image: Binary {
                subtype: BinarySubtype::Generic,
                bytes,
            },
            quiz_id: quiz_id.to_string(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attachment_links_quiz() {
        let attachment = Attachment::new("quiz-1", "image/png", vec![1, 2, 3]);

        assert_eq!(attachment.quiz_id, "quiz-1");
        assert_eq!(attachment.mime, "image/png");
        assert_eq!(attachment.image.bytes, vec![1, 2, 3]);
        assert!(attachment.has_image());
    }

    #[test]
    fn test_empty_payload_has_no_image() {
        let attachment = Attachment::new("quiz-1", "image/png", vec![]);
        assert!(!attachment.has_image());
    }
}
