pub mod attachment_repository;
pub mod quiz_repository;

pub use attachment_repository::{AttachmentRepository, MongoAttachmentRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
