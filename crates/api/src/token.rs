use std::sync::{Arc, Mutex};

use crate::storage;

/// Local storage key for the bearer token.
pub const TOKEN_KEY: &str = "lms.auth.token";

/// Where the client keeps its bearer token between requests.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token kept in local storage so a reload can re-authenticate.
#[derive(Debug, Clone)]
pub struct StoredToken {
    key: String,
}

impl StoredToken {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for StoredToken {
    fn default() -> Self {
        Self::new(TOKEN_KEY)
    }
}

impl TokenStore for StoredToken {
    fn load(&self) -> Option<String> {
        storage::get_item(&self.key).filter(|t| !t.trim().is_empty())
    }

    fn save(&self, token: &str) {
        storage::set_item(&self.key, token);
    }

    fn clear(&self) {
        storage::remove_item(&self.key);
    }
}

/// Token kept only for the lifetime of the client.
#[derive(Debug, Default, Clone)]
pub struct MemoryToken {
    inner: Arc<Mutex<Option<String>>>,
}

impl MemoryToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryToken {
    fn load(&self) -> Option<String> {
        self.inner.lock().ok()?.clone()
    }

    fn save(&self, token: &str) {
        if let Ok(mut t) = self.inner.lock() {
            *t = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut t) = self.inner.lock() {
            *t = None;
        }
    }
}
