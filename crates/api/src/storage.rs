//! Small key/value persistence: browser local storage on wasm, a
//! process-wide map elsewhere (native builds and tests).

use serde::{de::DeserializeOwned, Serialize};

#[cfg(target_arch = "wasm32")]
mod backend {
    use web_sys::{window, Storage};

    fn local_storage() -> Option<Storage> {
        window()?.local_storage().ok()?
    }

    pub fn get_item(key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    pub fn set_item(key: &str, value: &str) -> bool {
        local_storage()
            .map(|s| s.set_item(key, value).is_ok())
            .unwrap_or(false)
    }

    pub fn remove_item(key: &str) {
        if let Some(s) = local_storage() {
            let _ = s.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::collections::HashMap;
    use std::sync::{LazyLock, Mutex};

    static ITEMS: LazyLock<Mutex<HashMap<String, String>>> =
        LazyLock::new(|| Mutex::new(HashMap::new()));

    pub fn get_item(key: &str) -> Option<String> {
        ITEMS.lock().ok()?.get(key).cloned()
    }

    pub fn set_item(key: &str, value: &str) -> bool {
        match ITEMS.lock() {
            Ok(mut items) => {
                items.insert(key.to_string(), value.to_string());
                true
            }
            Err(_) => false,
        }
    }

    pub fn remove_item(key: &str) {
        if let Ok(mut items) = ITEMS.lock() {
            items.remove(key);
        }
    }
}

pub fn get_item(key: &str) -> Option<String> {
    backend::get_item(key)
}

/// Store a raw string. Returns `false` if storage is unavailable.
pub fn set_item(key: &str, value: &str) -> bool {
    let ok = backend::set_item(key, value);
    if !ok {
        tracing::warn!(key, "local storage unavailable; value not persisted");
    }
    ok
}

pub fn remove_item(key: &str) {
    backend::remove_item(key)
}

/// Store a value as JSON.
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => set_item(key, &json),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to serialize value for storage");
            false
        }
    }
}

/// Load a JSON value. Missing or unparsable entries yield `None`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key, error = %e, "discarding unreadable stored value");
            None
        }
    }
}
