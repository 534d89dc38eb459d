use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoAttachmentRepository, MongoQuizRepository},
    services::QuizService,
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config));
        quiz_repository.ensure_indexes().await?;

        let attachment_repository = Arc::new(MongoAttachmentRepository::new(&db, &config));
        attachment_repository.ensure_indexes().await?;

        let quiz_service = Arc::new(QuizService::new(quiz_repository, attachment_repository));

        Ok(Self {
            quiz_service,
            db,
            config: Arc::new(config),
        })
    }
}
