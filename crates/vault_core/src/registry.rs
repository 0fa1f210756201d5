//! The authoritative in-memory record list, mirrored to host storage.

use std::{cell::RefCell, rc::Rc};

use vault_host::{IngestedRead, RegistryStore};

use crate::{error::VaultError, record::FileRecord};

#[derive(Clone)]
/// Session-scoped file registry.
///
/// The record list is a single shared cell: every mutation and its
/// serialization happen in one synchronous section with no await point
/// inside, and [`FileRegistry::save`] serializes the list when the persist
/// future is polled rather than when it is created. Ingestion completions
/// that resolve out of order therefore never commit a stale snapshot over a
/// newer one, even though the host is single-threaded.
pub struct FileRegistry {
    records: Rc<RefCell<Vec<FileRecord>>>,
    store: Rc<dyn RegistryStore>,
}

impl FileRegistry {
    /// Creates an empty registry backed by `store`.
    pub fn new(store: Rc<dyn RegistryStore>) -> Self {
        Self {
            records: Rc::new(RefCell::new(Vec::new())),
            store,
        }
    }

    /// Loads the persisted registry, recovering to empty on absent or corrupt
    /// data.
    ///
    /// Corruption is a startup condition the user cannot act on, so it is
    /// logged and swallowed rather than propagated.
    pub async fn load(store: Rc<dyn RegistryStore>) -> Self {
        let records = read_persisted(store.as_ref()).await;
        Self {
            records: Rc::new(RefCell::new(records)),
            store,
        }
    }

    /// Re-reads persisted storage into this registry, with the same recovery
    /// behavior as [`FileRegistry::load`].
    pub async fn reload(&self) {
        let records = read_persisted(self.store.as_ref()).await;
        *self.records.borrow_mut() = records;
    }

    /// Returns the current records in insertion order.
    pub fn list(&self) -> Vec<FileRecord> {
        self.records.borrow().clone()
    }

    /// Returns the record with the given id, if present.
    pub fn find(&self, id: &str) -> Option<FileRecord> {
        self.records.borrow().iter().find(|r| r.id == id).cloned()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Appends `record` and persists the full list.
    ///
    /// A record whose id is already present replaces the existing record in
    /// place (whole-record replacement), keeping ids unique.
    ///
    /// # Errors
    ///
    /// Returns the storage error and rolls the in-memory list back to its
    /// prior state, so memory and storage never diverge past the failed
    /// mutation.
    pub async fn add(&self, record: FileRecord) -> Result<(), VaultError> {
        let replaced = {
            let mut records = self.records.borrow_mut();
            if let Some(slot) = records.iter_mut().find(|r| r.id == record.id) {
                let prior = slot.clone();
                *slot = record.clone();
                Some(prior)
            } else {
                records.push(record.clone());
                None
            }
        };

        if let Err(err) = self.save().await {
            let mut records = self.records.borrow_mut();
            match replaced {
                Some(prior) => {
                    if let Some(slot) = records.iter_mut().find(|r| r.id == prior.id) {
                        *slot = prior;
                    }
                }
                None => records.retain(|r| r.id != record.id),
            }
            return Err(err);
        }
        Ok(())
    }

    /// Stamps a completed host read into a record and adds it.
    ///
    /// # Errors
    ///
    /// Returns the storage error from [`FileRegistry::add`]; no record is
    /// retained on failure.
    pub async fn admit(&self, read: IngestedRead) -> Result<FileRecord, VaultError> {
        let record = FileRecord::from_read(read);
        // A freshly stamped id colliding with a held record means the stamp
        // source broke; the replacement path in `add` must not paper over it.
        debug_assert!(
            self.find(&record.id).is_none(),
            "fresh record id {} already present",
            record.id
        );
        self.add(record.clone()).await?;
        Ok(record)
    }

    /// Removes the record with `id` and persists; absent ids are a no-op.
    ///
    /// Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns the storage error and restores the removed record at its
    /// original position.
    pub async fn remove(&self, id: &str) -> Result<bool, VaultError> {
        let removed = {
            let mut records = self.records.borrow_mut();
            records
                .iter()
                .position(|r| r.id == id)
                .map(|idx| (idx, records.remove(idx)))
        };
        let Some((idx, record)) = removed else {
            return Ok(false);
        };

        if let Err(err) = self.save().await {
            let mut records = self.records.borrow_mut();
            let idx = idx.min(records.len());
            records.insert(idx, record);
            return Err(err);
        }
        Ok(true)
    }

    /// Serializes the current list in full and writes it to the store.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::QuotaExceeded`] when the store rejects the write
    /// for capacity, or [`VaultError::Storage`] for other backend failures.
    pub async fn save(&self) -> Result<(), VaultError> {
        // Serialized at poll time: the write always reflects the list as it
        // stands when the persist future actually runs.
        let raw = serde_json::to_string(&*self.records.borrow())
            .map_err(|e| VaultError::Storage(format!("registry serialization failed: {e}")))?;
        self.store.save_registry(&raw).await?;
        Ok(())
    }
}

async fn read_persisted(store: &dyn RegistryStore) -> Vec<FileRecord> {
    match store.load_registry().await {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<FileRecord>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                let parse = VaultError::Parse(err.to_string());
                leptos::logging::warn!("starting with an empty registry: {parse}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            leptos::logging::warn!("registry load failed, starting empty: {err}");
            Vec::new()
        }
    }
}
