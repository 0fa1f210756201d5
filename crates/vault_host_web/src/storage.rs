//! localStorage-backed registry and preference stores.
//!
//! These adapters are synchronous at the browser API boundary while also
//! implementing the async `vault_host` traits for compatibility with the
//! higher-level contracts. There is no await point between serialization and
//! the `setItem` call, which is what the registry's stale-write guarantee
//! relies on.

#[cfg(target_arch = "wasm32")]
use vault_host::{PREFS_STORAGE_KEY, REGISTRY_STORAGE_KEY};
use vault_host::{PrefsStore, RegistryStore, StoreError, StoreFuture};

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StoreError::Unavailable("localStorage unavailable".to_string()))
}

#[cfg(target_arch = "wasm32")]
fn classify_write_error(err: wasm_bindgen::JsValue) -> StoreError {
    use wasm_bindgen::JsCast;

    if let Some(exception) = err.dyn_ref::<web_sys::DomException>() {
        if exception.name() == "QuotaExceededError" {
            return StoreError::QuotaExceeded;
        }
        return StoreError::Backend(format!(
            "{}: {}",
            exception.name(),
            exception.message()
        ));
    }
    StoreError::Backend(format!("localStorage write failed: {err:?}"))
}

#[derive(Debug, Clone, Copy, Default)]
/// Registry document store backed by `window.localStorage`.
pub struct WebRegistryStore;

impl WebRegistryStore {
    fn load_raw(self) -> Result<Option<String>, StoreError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .get_item(REGISTRY_STORAGE_KEY)
                .map_err(|e| StoreError::Backend(format!("localStorage get_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(None)
        }
    }

    fn save_raw(self, raw: &str) -> Result<(), StoreError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .set_item(REGISTRY_STORAGE_KEY, raw)
                .map_err(classify_write_error)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = raw;
            Ok(())
        }
    }

    fn clear_raw(self) -> Result<(), StoreError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .remove_item(REGISTRY_STORAGE_KEY)
                .map_err(|e| StoreError::Backend(format!("localStorage remove_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(())
        }
    }
}

impl RegistryStore for WebRegistryStore {
    fn load_registry<'a>(&'a self) -> StoreFuture<'a, Result<Option<String>, StoreError>> {
        let store = *self;
        Box::pin(async move { store.load_raw() })
    }

    fn save_registry<'a>(&'a self, raw: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        let store = *self;
        Box::pin(async move { store.save_raw(raw) })
    }

    fn clear_registry<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>> {
        let store = *self;
        Box::pin(async move { store.clear_raw() })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Filter-preferences store backed by `window.localStorage`.
pub struct WebPrefsStore;

impl WebPrefsStore {
    fn load_raw(self) -> Result<Option<String>, StoreError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .get_item(PREFS_STORAGE_KEY)
                .map_err(|e| StoreError::Backend(format!("localStorage get_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(None)
        }
    }

    fn save_raw(self, raw: &str) -> Result<(), StoreError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .set_item(PREFS_STORAGE_KEY, raw)
                .map_err(classify_write_error)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = raw;
            Ok(())
        }
    }
}

impl PrefsStore for WebPrefsStore {
    fn load_prefs<'a>(&'a self) -> StoreFuture<'a, Result<Option<String>, StoreError>> {
        let store = *self;
        Box::pin(async move { store.load_raw() })
    }

    fn save_prefs<'a>(&'a self, raw: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        let store = *self;
        Box::pin(async move { store.save_raw(raw) })
    }
}
