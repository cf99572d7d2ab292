//! MongoDB access for items.

use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{Bson, Document, doc, oid::ObjectId},
    options::{ClientOptions, Credential},
};
use serde_json::Value;
use tracing::info;

use crate::config::MongoConfig;

/// Collection holding the sample items.
pub const ITEMS_COLLECTION: &str = "items";

/// Item repository.
#[derive(Debug, Clone)]
pub struct ItemStore {
    collection: Collection<Document>,
}

/// Result of an update against an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
    pub modified: u64,
}

impl ItemStore {
    /// Builds a client for the deployment at `uri`.
    ///
    /// The driver connects lazily, so this succeeds even when the server is
    /// not yet reachable.
    pub async fn connect(uri: &str, config: &MongoConfig) -> mongodb::error::Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.direct_connection = Some(true);
        if let Some((username, password)) = config.credentials() {
            options.credential = Some(
                Credential::builder()
                    .username(username.to_string())
                    .password(password.to_string())
                    .source("admin".to_string())
                    .build(),
            );
        }

        info!(database = %config.database, "Connecting to MongoDB");
        let client = Client::with_options(options)?;
        Ok(Self::new(&client.database(&config.database)))
    }

    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(ITEMS_COLLECTION),
        }
    }

    pub async fn list(&self, skip: u64, limit: i64) -> mongodb::error::Result<Vec<Document>> {
        let cursor = self.collection.find(doc! {}).skip(skip).limit(limit).await?;
        cursor.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> mongodb::error::Result<Option<Document>> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    /// Inserts a document and returns its id as a string.
    pub async fn insert(&self, item: Document) -> mongodb::error::Result<String> {
        let result = self.collection.insert_one(item).await?;
        Ok(id_string(&result.inserted_id))
    }

    /// Applies `$set` with the given fields. `None` means no document matched.
    pub async fn update(
        &self,
        id: ObjectId,
        fields: Document,
    ) -> mongodb::error::Result<Option<UpdateSummary>> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }
        Ok(Some(UpdateSummary {
            modified: result.modified_count,
        }))
    }

    /// Deletes a document. Returns whether one was removed.
    pub async fn delete(&self, id: ObjectId) -> mongodb::error::Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

/// Parses a path segment into an ObjectId.
pub fn parse_item_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw).ok()
}

/// Converts a stored document into JSON, replacing `_id` with a string `id`.
pub fn serialize_item(mut item: Document) -> Value {
    if let Some(id) = item.remove("_id") {
        item.insert("id", id_string(&id));
    }
    Bson::Document(item).into_relaxed_extjson()
}

fn id_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
