use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use rolodex_core::{
    Result, UserDirectory, UserDocument, UserKey, UserPatch, seed::SeedSource, store::UserStore,
};
use rolodex_server::{config::Config, routes, state::AppState};

/// In-memory stand-in for the MongoDB collection, good enough to exercise
/// the HTTP layer end to end. Preserves insertion order, so pagination is
/// stable across pages.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<Vec<UserDocument>>,
}

fn matches(doc: &UserDocument, key: &UserKey) -> bool {
    match key {
        UserKey::Native(oid) => doc.object_id == Some(*oid),
        UserKey::Legacy(id) => doc.id == Some(*id),
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_page(&self, skip: u64, limit: i64) -> Result<Vec<UserDocument>> {
        let docs = self.docs.lock().unwrap();
        Ok(docs
            .iter()
            .skip(skip as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_by_key(&self, key: &UserKey) -> Result<Option<UserDocument>> {
        let docs = self.docs.lock().unwrap();
        Ok(docs.iter().find(|doc| matches(doc, key)).cloned())
    }

    async fn apply_patch(&self, key: &UserKey, patch: &UserPatch) -> Result<bool> {
        let mut docs = self.docs.lock().unwrap();
        let Some(doc) = docs.iter_mut().find(|doc| matches(doc, key)) else {
            return Ok(false);
        };
        if let Some(first_name) = &patch.first_name {
            doc.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            doc.last_name = last_name.clone();
        }
        if let Some(email) = &patch.email {
            doc.email = email.clone();
        }
        Ok(true)
    }

    async fn delete(&self, key: &UserKey) -> Result<bool> {
        let mut docs = self.docs.lock().unwrap();
        match docs.iter().position(|doc| matches(doc, key)) {
            Some(position) => {
                docs.remove(position);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.docs.lock().unwrap().len() as u64)
    }

    async fn insert_batch(&self, users: Vec<UserDocument>) -> Result<()> {
        self.docs.lock().unwrap().extend(users);
        Ok(())
    }
}

/// Serves a fixed demo batch the way the external seed API would.
#[derive(Debug)]
pub struct StaticSeed {
    batch: Vec<UserDocument>,
}

#[async_trait]
impl SeedSource for StaticSeed {
    async fn fetch_batch(&self) -> Result<Vec<UserDocument>> {
        Ok(self.batch.clone())
    }
}

/// Twelve demo records shaped like the external seed payload: legacy ids
/// 1..=12, stored avatars on the even ones only.
pub fn demo_batch() -> Vec<UserDocument> {
    (1..=12)
        .map(|n| UserDocument {
            object_id: None,
            id: Some(n),
            email: format!("user{n}@reqres.in"),
            first_name: format!("First{n}"),
            last_name: format!("Last{n}"),
            avatar: (n % 2 == 0).then(|| format!("https://reqres.in/img/faces/{n}-image.jpg")),
            password: None,
        })
        .collect()
}

pub fn test_config() -> Config {
    Config::default()
}

/// A test server over the full router with an empty in-memory store; the
/// first list request seeds it from [`demo_batch`].
pub fn build_test_server() -> TestServer {
    let directory = UserDirectory::new(
        Arc::new(MemoryStore::default()),
        Arc::new(StaticSeed {
            batch: demo_batch(),
        }),
    );
    let state = AppState {
        directory: Arc::new(directory),
        config: Arc::new(test_config()),
    };

    TestServer::new(routes::api_router(state)).expect("test server builds")
}
