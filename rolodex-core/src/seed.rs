use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{DirectoryError, Result};
use crate::user::UserDocument;

/// Default demo-data endpoint; one fetch fills the whole directory.
pub const DEFAULT_SEED_URL: &str = "https://reqres.in/api/users?per_page=12";

/// External provider of initial demo records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch one batch of demo users, to be inserted verbatim.
    async fn fetch_batch(&self) -> Result<Vec<UserDocument>>;
}

/// Wire envelope of the demo API: `{"data": [...]}`.
#[derive(Debug, Deserialize)]
struct SeedEnvelope {
    #[serde(default)]
    data: Vec<UserDocument>,
}

/// Seed source backed by the public Reqres demo API.
#[derive(Clone, Debug)]
pub struct ReqresSeedSource {
    http: reqwest::Client,
    url: String,
}

impl ReqresSeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for ReqresSeedSource {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_URL)
    }
}

#[async_trait]
impl SeedSource for ReqresSeedSource {
    async fn fetch_batch(&self) -> Result<Vec<UserDocument>> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DirectoryError::Seed(format!("seed request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DirectoryError::Seed(format!("seed endpoint rejected request: {e}")))?;

        let envelope: SeedEnvelope = response
            .json()
            .await
            .map_err(|e| DirectoryError::Seed(format!("malformed seed payload: {e}")))?;

        Ok(envelope.data)
    }
}
