use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::Attachment};

#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Option<Attachment>>;
    async fn find_by_quiz_ids(&self, quiz_ids: &[String]) -> AppResult<Vec<Attachment>>;
    async fn insert(&self, attachment: Attachment) -> AppResult<Attachment>;
    /// Returns the number of records removed; zero is not an error since the
    /// owning quiz may simply have no attachment.
    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64>;
}

pub struct MongoAttachmentRepository {
    collection: Collection<Attachment>,
}

impl MongoAttachmentRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.get_collection(&config.attachments_collection);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for attachments collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // One attachment per quiz
        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(quiz_id_index).await?;

        Ok(())
    }
}

#[async_trait]
impl AttachmentRepository for MongoAttachmentRepository {
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Option<Attachment>> {
        let attachment = self
            .collection
            .find_one(doc! { "quiz_id": quiz_id })
            .await?;
        Ok(attachment)
    }

    async fn find_by_quiz_ids(&self, quiz_ids: &[String]) -> AppResult<Vec<Attachment>> {
        let cursor = self
            .collection
            .find(doc! { "quiz_id": { "$in": quiz_ids } })
            .await?;
        let attachments: Vec<Attachment> = cursor.try_collect().await?;
        Ok(attachments)
    }

    async fn insert(&self, attachment: Attachment) -> AppResult<Attachment> {
        self.collection.insert_one(&attachment).await?;
        Ok(attachment)
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "quiz_id": quiz_id })
            .await?;
        Ok(result.deleted_count)
    }
}
