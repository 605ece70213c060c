// LocalStorage backend implementation

use super::StorageBackend;
use playground_core::StorageError;

/// LocalStorage backend for browser-based storage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }
}

// WASM implementation using gloo-storage
#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    use super::*;
    use gloo_storage::{LocalStorage, Storage};

    impl StorageBackend for LocalStorageBackend {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            LocalStorage::raw()
                .get_item(key)
                .map_err(|e| StorageError::ReadFailed {
                    key: key.to_string(),
                    reason: format!("{:?}", e),
                })
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            LocalStorage::raw()
                .set_item(key, value)
                .map_err(|_| StorageError::QuotaExceeded(key.to_string()))
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            LocalStorage::raw()
                .remove_item(key)
                .map_err(|_| StorageError::Unavailable)
        }
    }
}

// Non-WASM targets have no browser storage
#[cfg(not(target_arch = "wasm32"))]
impl StorageBackend for LocalStorageBackend {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
