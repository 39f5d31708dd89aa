use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{DateTime, Document, doc};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection, Database as MongoDatabase};

use crate::config::Config;
use crate::data_models::StoredItem;
use crate::query::PageRequest;
use crate::repository::SearchRepository;

/// Main database wrapper providing connection management and collection access
#[derive(Debug, Clone)]
pub struct Database {
    client: Client,
    db: MongoDatabase,
}

impl Database {
    /// Connect and ping. The returned handle is meant to live for the whole process.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        let client_options = ClientOptions::parse(uri)
            .await
            .context("Failed to parse MongoDB connection string")?;

        let client =
            Client::with_options(client_options).context("Failed to create MongoDB client")?;

        // Ping the database to verify connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to connect to MongoDB")?;

        log::info!("Connected to MongoDB database: {}", db_name);

        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    /// Returns `Ok(None)` when no `MONGO_URI` is configured.
    pub async fn from_config(config: &Config) -> Result<Option<Self>> {
        match &config.mongo_uri {
            Some(uri) => Ok(Some(Self::new(uri, &config.mongo_db_name).await?)),
            None => Ok(None),
        }
    }

    /// Get a typed collection by name
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.db.collection(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &MongoDatabase {
        &self.db
    }
}

/// MongoDB-backed search store. Items are keyed by `_id`.
pub struct MongoSearchRepo {
    collection: Collection<StoredItem>,
}

impl MongoSearchRepo {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection(collection_name),
        }
    }
}

/// Case-insensitive substring predicate over title OR content.
/// The query is escaped so it matches literally.
pub fn contains_filter(text: &str) -> Document {
    let pattern = regex::escape(text);
    doc! {
        "$or": [
            { "title": { "$regex": pattern.as_str(), "$options": "i" } },
            { "content": { "$regex": pattern.as_str(), "$options": "i" } },
        ]
    }
}

#[async_trait]
impl SearchRepository for MongoSearchRepo {
    async fn search(&self, text: &str, page: PageRequest) -> Result<Vec<StoredItem>> {
        let cursor = self
            .collection
            .find(contains_filter(text))
            .sort(doc! { "_id": 1 })
            .skip(page.skip())
            .limit(page.take() as i64)
            .await
            .context("Failed to execute search query")?;

        cursor
            .try_collect()
            .await
            .context("Failed to collect search results")
    }

    async fn count(&self, text: &str) -> Result<u64> {
        self.collection
            .count_documents(contains_filter(text))
            .await
            .context("Failed to count documents")
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredItem>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .context("Failed to find document by id")
    }

    async fn create(&self, mut item: StoredItem) -> Result<StoredItem> {
        let now = DateTime::now();
        item.created_at = now;
        item.updated_at = now;

        self.collection
            .insert_one(&item)
            .await
            .context("Failed to insert document")?;
        Ok(item)
    }

    async fn update(&self, item: StoredItem) -> Result<Option<StoredItem>> {
        let update = doc! {
            "$set": {
                "title": item.title.as_str(),
                "content": item.content.as_str(),
                "link": item.link.as_str(),
                "tags": item.tags.clone(),
                "score": item.score,
                "updated_at": DateTime::now(),
            }
        };

        self.collection
            .find_one_and_update(doc! { "_id": item.id.as_str() }, update)
            .return_document(ReturnDocument::After)
            .await
            .context("Failed to update document")
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .context("Failed to delete document")?;

        Ok(result.deleted_count > 0)
    }
}
