//! `localStorage`-backed key-value store

use geomx_core::{KeyValueStore, StorageError};
use web_sys::Storage;

/// Wraps `window.localStorage`. When storage is blocked (private mode,
/// sandboxed iframes) reads come back empty and writes fail softly.
pub struct LocalStore {
    local: Option<Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let local = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if local.is_none() {
            log::info!("localStorage unavailable; toggles will not persist");
        }
        Self { local }
    }

    pub fn is_available(&self) -> bool {
        self.local.is_some()
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.local.as_ref()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.local
            .as_ref()
            .ok_or(StorageError::Unavailable)?
            .set_item(key, value)
            .map_err(|err| StorageError::Backend(format!("{:?}", err)))
    }
}
