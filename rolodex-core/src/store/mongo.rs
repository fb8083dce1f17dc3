use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc, to_bson};
use mongodb::{Client, Collection};
use tracing::info;

use crate::error::{DirectoryError, Result};
use crate::store::UserStore;
use crate::user::{UserDocument, UserKey, UserPatch};

const USERS_COLLECTION: &str = "users";

/// MongoDB-backed implementation of the [`UserStore`] port.
///
/// Holds a collection handle off the process-wide client; the client's
/// lifecycle (connect at startup, explicit shutdown) belongs to the caller.
#[derive(Clone, Debug)]
pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            collection: client.database(database).collection(USERS_COLLECTION),
        }
    }

    fn selector(key: &UserKey) -> Document {
        match key {
            UserKey::Native(oid) => doc! { "_id": *oid },
            UserKey::Legacy(id) => doc! { "id": *id },
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_page(&self, skip: u64, limit: i64) -> Result<Vec<UserDocument>> {
        let cursor = self
            .collection
            .find(doc! {})
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| DirectoryError::Store(format!("failed to query user page: {e}")))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| DirectoryError::Store(format!("failed to drain user page: {e}")))
    }

    async fn find_by_key(&self, key: &UserKey) -> Result<Option<UserDocument>> {
        self.collection
            .find_one(Self::selector(key))
            .await
            .map_err(|e| DirectoryError::Store(format!("failed to look up user: {e}")))
    }

    async fn apply_patch(&self, key: &UserKey, patch: &UserPatch) -> Result<bool> {
        if patch.is_empty() {
            return Ok(self.find_by_key(key).await?.is_some());
        }

        let fields = to_bson(patch)
            .map_err(|e| DirectoryError::Store(format!("failed to encode patch: {e}")))?;
        let result = self
            .collection
            .update_one(Self::selector(key), doc! { "$set": fields })
            .await
            .map_err(|e| DirectoryError::Store(format!("failed to update user: {e}")))?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, key: &UserKey) -> Result<bool> {
        let result = self
            .collection
            .delete_one(Self::selector(key))
            .await
            .map_err(|e| DirectoryError::Store(format!("failed to delete user: {e}")))?;

        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> Result<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| DirectoryError::Store(format!("failed to count users: {e}")))
    }

    async fn insert_batch(&self, users: Vec<UserDocument>) -> Result<()> {
        if users.is_empty() {
            return Ok(());
        }

        let count = users.len();
        self.collection
            .insert_many(users)
            .await
            .map_err(|e| DirectoryError::Store(format!("failed to insert seed batch: {e}")))?;

        info!(count, "inserted users into {}", USERS_COLLECTION);
        Ok(())
    }
}
