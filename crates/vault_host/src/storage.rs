//! Persistent document storage contracts and adapters.
//!
//! The vault persists two documents in host key-value storage: the registry
//! (the whole record list as one JSON array) and the filter preferences.
//! Implementations rewrite a document in full on every save; there is no
//! incremental patching.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Storage entry name holding the serialized registry document.
///
/// This matches the layout the vault inherited, so previously persisted data
/// keeps loading. There is no version field; any shape change is breaking.
pub const REGISTRY_STORAGE_KEY: &str = "fileStorage";

/// Storage entry name holding the serialized filter preferences.
///
/// Unlike the registry entry this key is vault-introduced, so it carries a
/// version suffix.
pub const PREFS_STORAGE_KEY: &str = "vault.filter_prefs.v1";

/// Typed error returned by storage operations.
///
/// Quota rejection is its own variant because callers treat it differently
/// from plain backend failure (the user is notified and the triggering
/// operation abandoned, prior state intact).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store is not available in this context.
    Unavailable(String),
    /// The backing store rejected a write for capacity reasons.
    QuotaExceeded,
    /// Any other backend read/write failure.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(detail) => write!(f, "storage unavailable: {detail}"),
            Self::QuotaExceeded => write!(f, "storage quota exceeded"),
            Self::Backend(detail) => write!(f, "storage backend failure: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Object-safe boxed future used by the storage traits.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service persisting the serialized registry document.
pub trait RegistryStore {
    /// Loads the raw registry document, or `None` when nothing is persisted.
    fn load_registry<'a>(&'a self) -> StoreFuture<'a, Result<Option<String>, StoreError>>;

    /// Overwrites the registry document with `raw`.
    fn save_registry<'a>(&'a self, raw: &'a str) -> StoreFuture<'a, Result<(), StoreError>>;

    /// Removes the persisted registry document.
    fn clear_registry<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>>;
}

/// Host service persisting the serialized filter-preferences document.
///
/// The vault keeps exactly one preferences document, so the contract is
/// scoped to that single entry rather than exposing arbitrary keys.
pub trait PrefsStore {
    /// Loads the raw preferences document, or `None` when nothing is
    /// persisted.
    fn load_prefs<'a>(&'a self) -> StoreFuture<'a, Result<Option<String>, StoreError>>;

    /// Overwrites the preferences document with `raw`.
    fn save_prefs<'a>(&'a self, raw: &'a str) -> StoreFuture<'a, Result<(), StoreError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op registry store for unsupported targets and baseline tests.
pub struct NoopRegistryStore;

impl RegistryStore for NoopRegistryStore {
    fn load_registry<'a>(&'a self) -> StoreFuture<'a, Result<Option<String>, StoreError>> {
        Box::pin(async { Ok(None) })
    }

    fn save_registry<'a>(&'a self, _raw: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async { Ok(()) })
    }

    fn clear_registry<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets and baseline tests.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_prefs<'a>(&'a self) -> StoreFuture<'a, Result<Option<String>, StoreError>> {
        Box::pin(async { Ok(None) })
    }

    fn save_prefs<'a>(&'a self, _raw: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory registry store with an optional byte quota for exercising
/// capacity failures in tests.
pub struct MemoryRegistryStore {
    inner: Rc<RefCell<Option<String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryRegistryStore {
    /// Creates a store that rejects documents larger than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(None)),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns the currently persisted raw document, if any.
    pub fn raw(&self) -> Option<String> {
        self.inner.borrow().clone()
    }

    /// Replaces the persisted raw document directly (corruption injection).
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.inner.borrow_mut() = Some(raw.into());
    }
}

impl RegistryStore for MemoryRegistryStore {
    fn load_registry<'a>(&'a self) -> StoreFuture<'a, Result<Option<String>, StoreError>> {
        Box::pin(async move { Ok(self.inner.borrow().clone()) })
    }

    fn save_registry<'a>(&'a self, raw: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            if let Some(quota) = self.quota_bytes {
                if raw.len() > quota {
                    return Err(StoreError::QuotaExceeded);
                }
            }
            *self.inner.borrow_mut() = Some(raw.to_string());
            Ok(())
        })
    }

    fn clear_registry<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            *self.inner.borrow_mut() = None;
            Ok(())
        })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store holding the single preferences document.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<Option<String>>>,
}

impl MemoryPrefsStore {
    /// Returns the currently persisted raw document, if any.
    pub fn raw(&self) -> Option<String> {
        self.inner.borrow().clone()
    }

    /// Replaces the persisted raw document directly (corruption injection).
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.inner.borrow_mut() = Some(raw.into());
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_prefs<'a>(&'a self) -> StoreFuture<'a, Result<Option<String>, StoreError>> {
        Box::pin(async move { Ok(self.inner.borrow().clone()) })
    }

    fn save_prefs<'a>(&'a self, raw: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            *self.inner.borrow_mut() = Some(raw.to_string());
            Ok(())
        })
    }
}

/// Loads and deserializes the typed preferences document.
///
/// # Errors
///
/// Returns the store error, or a backend error when the persisted document
/// does not deserialize.
pub async fn load_prefs_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.load_prefs().await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw)
        .map_err(|e| StoreError::Backend(format!("preferences deserialization failed: {e}")))?;
    Ok(Some(value))
}

/// Serializes and saves the typed preferences document.
///
/// # Errors
///
/// Returns the store error, or a backend error when serialization fails.
pub async fn save_prefs_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StoreError::Backend(format!("preferences serialization failed: {e}")))?;
    store.save_prefs(&raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct PrefDoc {
        max_size: u64,
    }

    #[test]
    fn memory_registry_store_round_trip_and_clear() {
        let store = MemoryRegistryStore::default();
        let store_obj: &dyn RegistryStore = &store;

        assert_eq!(block_on(store_obj.load_registry()).expect("load"), None);
        block_on(store_obj.save_registry("[]")).expect("save");
        assert_eq!(
            block_on(store_obj.load_registry()).expect("load"),
            Some("[]".to_string())
        );
        block_on(store_obj.clear_registry()).expect("clear");
        assert_eq!(block_on(store_obj.load_registry()).expect("load"), None);
    }

    #[test]
    fn memory_registry_store_enforces_quota_and_keeps_prior_document() {
        let store = MemoryRegistryStore::with_quota(8);
        let store_obj: &dyn RegistryStore = &store;

        block_on(store_obj.save_registry("[1,2]")).expect("small save fits");
        let err = block_on(store_obj.save_registry("[1,2,3,4,5]"))
            .expect_err("oversized save should be rejected");
        assert_eq!(err, StoreError::QuotaExceeded);
        assert_eq!(
            block_on(store_obj.load_registry()).expect("load"),
            Some("[1,2]".to_string()),
            "rejected write must not clobber the prior document"
        );
    }

    #[test]
    fn noop_registry_store_is_empty_and_successful() {
        let store = NoopRegistryStore;
        let store_obj: &dyn RegistryStore = &store;
        assert_eq!(block_on(store_obj.load_registry()).expect("load"), None);
        block_on(store_obj.save_registry("[]")).expect("save");
        block_on(store_obj.clear_registry()).expect("clear");
    }

    #[test]
    fn memory_prefs_store_holds_one_document() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        assert_eq!(block_on(store_obj.load_prefs()).expect("load"), None);
        block_on(store_obj.save_prefs("{\"max_size\":1}")).expect("save");
        block_on(store_obj.save_prefs("{\"max_size\":2}")).expect("overwrite");
        assert_eq!(
            block_on(store_obj.load_prefs()).expect("load"),
            Some("{\"max_size\":2}".to_string()),
            "a save must replace the whole document"
        );
        assert_eq!(store.raw(), Some("{\"max_size\":2}".to_string()));
    }

    #[test]
    fn typed_prefs_helpers_round_trip() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;
        block_on(save_prefs_with(store_obj, &PrefDoc { max_size: 4096 }))
            .expect("save typed prefs");

        let loaded: Option<PrefDoc> =
            block_on(load_prefs_with(store_obj)).expect("load typed prefs");
        assert_eq!(loaded, Some(PrefDoc { max_size: 4096 }));
    }

    #[test]
    fn corrupt_prefs_document_surfaces_a_backend_error() {
        let store = MemoryPrefsStore::default();
        store.set_raw("not json");

        let err = block_on(load_prefs_with::<_, PrefDoc>(&store))
            .expect_err("corrupt document should not deserialize");
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn noop_prefs_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        assert_eq!(block_on(store_obj.load_prefs()).expect("load"), None);
        block_on(store_obj.save_prefs("{}")).expect("save");
    }

    #[test]
    fn store_error_display_is_stable() {
        assert_eq!(
            StoreError::QuotaExceeded.to_string(),
            "storage quota exceeded"
        );
        assert_eq!(
            StoreError::Unavailable("no window".to_string()).to_string(),
            "storage unavailable: no window"
        );
    }
}
