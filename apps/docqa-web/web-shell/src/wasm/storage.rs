use super::*;

use docqa_client_core::DraftStore;

#[derive(Debug, thiserror::Error)]
pub(super) enum StorageError {
    #[error("window is unavailable")]
    NoWindow,
    #[error("localStorage is unavailable")]
    Unavailable,
    #[error("localStorage {operation} failed for key {key}")]
    Operation { operation: &'static str, key: String },
}

/// Draft storage backed by `window.localStorage`.
pub(super) struct LocalStorageDraftStore {
    storage: web_sys::Storage,
}

impl LocalStorageDraftStore {
    pub(super) fn from_window() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::NoWindow)?;
        let storage = window
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl DraftStore for LocalStorageDraftStore {
    type Error = StorageError;

    fn read_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.storage
            .get_item(key)
            .map_err(|_| StorageError::Operation {
                operation: "read",
                key: key.to_string(),
            })
    }

    fn write_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.storage
            .set_item(key, value)
            .map_err(|_| StorageError::Operation {
                operation: "write",
                key: key.to_string(),
            })
    }
}
