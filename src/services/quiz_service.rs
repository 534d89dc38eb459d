use std::collections::HashMap;
use std::sync::Arc;

use validator::{Validate, ValidationErrors};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Attachment, Quiz},
        dto::{
            request::{QuizForm, UploadedImage},
            response::{CheckResponse, PlayResponse, QuizResponse},
        },
    },
    repositories::{AttachmentRepository, QuizRepository},
};

/// Result of a create/update: either the persisted record, or the unsaved
/// record echoed back with the field errors so the form can be re-rendered.
#[derive(Debug)]
pub enum QuizSaveOutcome {
    Saved(Quiz),
    Invalid { quiz: Quiz, errors: ValidationErrors },
}

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    attachments: Arc<dyn AttachmentRepository>,
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, attachments: Arc<dyn AttachmentRepository>) -> Self {
        Self {
            quizzes,
            attachments,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<QuizResponse>> {
        let quizzes = self.quizzes.find_all().await?;

        let quiz_ids: Vec<String> = quizzes.iter().map(|q| q.id.clone()).collect();
        let mut by_quiz: HashMap<String, Attachment> = self
            .attachments
            .find_by_quiz_ids(&quiz_ids)
            .await?
            .into_iter()
            .map(|a| (a.quiz_id.clone(), a))
            .collect();

        Ok(quizzes
            .into_iter()
            .map(|quiz| {
                let attachment = by_quiz.remove(&quiz.id);
                QuizResponse::from_quiz(quiz, attachment.as_ref())
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<QuizResponse> {
        let quiz = self.load_quiz(id).await?;
        let attachment = self.attachments.find_by_quiz(id).await?;
        Ok(QuizResponse::from_quiz(quiz, attachment.as_ref()))
    }

    pub async fn create(&self, form: QuizForm) -> AppResult<QuizSaveOutcome> {
        let quiz = Quiz::new(&form.question, &form.answer);

        if let Err(errors) = form.validate() {
            return Ok(QuizSaveOutcome::Invalid { quiz, errors });
        }

        let quiz = self.quizzes.insert(quiz).await?;

        if let Some(upload) = form.upload {
            self.attach_upload(&quiz.id, upload).await;
        }

        Ok(QuizSaveOutcome::Saved(quiz))
    }

    pub async fn update(&self, id: &str, form: QuizForm) -> AppResult<QuizSaveOutcome> {
        let mut quiz = self.load_quiz(id).await?;
        quiz.apply_edit(&form.question, &form.answer);

        if let Err(errors) = form.validate() {
            return Ok(QuizSaveOutcome::Invalid { quiz, errors });
        }

        let quiz = self.quizzes.update(quiz).await?;

        if let Some(upload) = form.upload {
            self.attach_upload(&quiz.id, upload).await;
        }

        Ok(QuizSaveOutcome::Saved(quiz))
    }

    /// Deletes the quiz, then best-effort removes its attachment. The quiz
    /// deletion is authoritative; a failure on the attachment side is logged
    /// and swallowed, never surfaced to the caller.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.quizzes.delete(id).await?;

        if let Err(err) = self.attachments.delete_by_quiz(id).await {
            log::warn!("Failed to delete attachment for quiz {}: {}", id, err);
        }

        Ok(())
    }

    pub async fn attachment(&self, quiz_id: &str) -> AppResult<Option<Attachment>> {
        self.load_quiz(quiz_id).await?;
        self.attachments.find_by_quiz(quiz_id).await
    }

    pub async fn play(&self, id: &str, answer: String) -> AppResult<PlayResponse> {
        let quiz = self.get(id).await?;
        Ok(PlayResponse { quiz, answer })
    }

    pub async fn check(&self, id: &str, answer: String) -> AppResult<CheckResponse> {
        let quiz = self.get(id).await?;
        let result = answer_is_correct(&answer, &quiz.answer);
        Ok(CheckResponse {
            quiz,
            answer,
            result,
        })
    }

    async fn load_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("There is no quiz with id={}", id)))
    }

    /// Replace-then-insert of the uploaded image. Runs after the quiz itself
    /// has been persisted; failures here are logged and swallowed so the quiz
    /// operation still reports success.
    async fn attach_upload(&self, quiz_id: &str, upload: UploadedImage) {
        if let Err(err) = self.save_attachment(quiz_id, upload).await {
            log::warn!("Failed to save attachment for quiz {}: {}", quiz_id, err);
        }
    }

    async fn save_attachment(&self, quiz_id: &str, upload: UploadedImage) -> AppResult<()> {
        self.attachments.delete_by_quiz(quiz_id).await?;
        let attachment = Attachment::new(quiz_id, &upload.mime, upload.bytes);
        self.attachments.insert(attachment).await?;
        Ok(())
    }
}

/// Grades a submitted answer against the stored one: trim both ends,
/// lower-case, compare exactly. Internal whitespace is significant.
pub fn answer_is_correct(submitted: &str, expected: &str) -> bool {
    submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}
