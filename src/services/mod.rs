pub mod quiz_service;

pub use quiz_service::{QuizSaveOutcome, QuizService};
