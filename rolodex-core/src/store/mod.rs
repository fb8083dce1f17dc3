mod mongo;

pub use mongo::MongoUserStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::user::{UserDocument, UserKey, UserPatch};

/// Persistence port for the `users` collection.
///
/// Implementations provide per-document atomicity and nothing more;
/// concurrent writers race with last-write-wins semantics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Up to `limit` documents after skipping `skip`, in the store's
    /// natural order.
    async fn find_page(&self, skip: u64, limit: i64) -> Result<Vec<UserDocument>>;

    async fn find_by_key(&self, key: &UserKey) -> Result<Option<UserDocument>>;

    /// Merge-patch the matching document. Returns whether a document
    /// matched; an empty patch leaves the document untouched.
    async fn apply_patch(&self, key: &UserKey, patch: &UserPatch) -> Result<bool>;

    /// Remove at most one matching document. True iff one was removed.
    async fn delete(&self, key: &UserKey) -> Result<bool>;

    async fn count(&self) -> Result<u64>;

    /// Bulk-insert seed records verbatim; normalization happens at read
    /// time only.
    async fn insert_batch(&self, users: Vec<UserDocument>) -> Result<()>;
}
