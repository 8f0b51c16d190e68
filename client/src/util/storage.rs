//! `window.localStorage` backend for the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes the web-sys glue so `session::SessionStore` stays browser
//! agnostic. Outside the browser every call reports
//! [`StorageError::Unavailable`], which the store treats as "no session".

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{KeyValueStore, StorageError};

/// Zero-sized handle; the `Storage` object is looked up per call so the
/// handle stays `Send + Sync` for Leptos context.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "csr")]
fn rejected(op: &'static str, key: &str, err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Rejected { op, key: key.to_owned(), reason: format!("{err:?}") }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).map_err(|e| rejected("get", key, &e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_item(key, value).map_err(|e| rejected("set", key, &e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.remove_item(key).map_err(|e| rejected("remove", key, &e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }
}
