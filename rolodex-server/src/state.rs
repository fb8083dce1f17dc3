use std::{fmt, sync::Arc};

use rolodex_core::UserDirectory;

use crate::config::Config;

/// Shared request state: the directory service plus the loaded config.
/// Everything else is per-request.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
