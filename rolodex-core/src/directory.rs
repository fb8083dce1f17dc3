use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::error::{DirectoryError, Result};
use crate::seed::SeedSource;
use crate::store::UserStore;
use crate::user::{UserDocument, UserKey, UserPage, UserPatch, UserProfile};

/// Page size used when the client does not ask for one.
pub const DEFAULT_PER_PAGE: i64 = 6;

/// The user directory service: pagination, id resolution, normalization,
/// and one-time seeding over the store port.
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
    seed: Arc<dyn SeedSource>,
    seed_guard: Mutex<()>,
}

impl fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDirectory").finish_non_exhaustive()
    }
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserStore>, seed: Arc<dyn SeedSource>) -> Self {
        Self {
            store,
            seed,
            seed_guard: Mutex::new(()),
        }
    }

    /// One page of normalized users plus pagination bookkeeping.
    ///
    /// Absent or nonpositive inputs fall back to page 1 and
    /// [`DEFAULT_PER_PAGE`]. Ordering across pages follows whatever order
    /// the store returns.
    pub async fn list(&self, page: Option<i64>, per_page: Option<i64>) -> Result<UserPage> {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let per_page = per_page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PER_PAGE);

        let skip = (page as u64 - 1).saturating_mul(per_page as u64);
        let users = self.store.find_page(skip, per_page).await?;
        let total = self.store.count().await?;

        Ok(UserPage {
            data: users.into_iter().map(UserDocument::normalize).collect(),
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page as u64),
        })
    }

    pub async fn get(&self, raw_id: &str) -> Result<UserProfile> {
        let key = Self::resolve(raw_id)?;
        self.store
            .find_by_key(&key)
            .await?
            .map(UserDocument::normalize)
            .ok_or_else(|| DirectoryError::NotFound(raw_id.to_string()))
    }

    /// Merge-patch the mutable fields, then re-read and normalize.
    ///
    /// A concurrent delete between the patch and the re-read surfaces as
    /// not-found.
    pub async fn update(&self, raw_id: &str, patch: UserPatch) -> Result<UserProfile> {
        let key = Self::resolve(raw_id)?;
        if !self.store.apply_patch(&key, &patch).await? {
            return Err(DirectoryError::NotFound(raw_id.to_string()));
        }
        info!(id = raw_id, "updated user");
        self.get(raw_id).await
    }

    /// True exactly once per record; false when the id addresses nothing.
    pub async fn delete(&self, raw_id: &str) -> Result<bool> {
        let Some(key) = UserKey::parse(raw_id) else {
            return Ok(false);
        };
        let deleted = self.store.delete(&key).await?;
        if deleted {
            info!(id = raw_id, "deleted user");
        }
        Ok(deleted)
    }

    /// Populate an empty collection from the seed source.
    ///
    /// Idempotent, and single-flighted in-process: concurrent callers wait
    /// on the guard and observe the nonzero count. Records are inserted
    /// verbatim; normalization happens only at read time.
    pub async fn seed_if_empty(&self) -> Result<()> {
        let _guard = self.seed_guard.lock().await;
        if self.store.count().await? > 0 {
            return Ok(());
        }

        let batch = self.seed.fetch_batch().await?;
        if batch.is_empty() {
            return Ok(());
        }

        let count = batch.len();
        self.store.insert_batch(batch).await?;
        info!(count, "seeded initial users");
        Ok(())
    }

    fn resolve(raw_id: &str) -> Result<UserKey> {
        UserKey::parse(raw_id).ok_or_else(|| DirectoryError::NotFound(raw_id.to_string()))
    }
}
