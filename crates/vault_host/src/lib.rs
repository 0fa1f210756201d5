//! Typed host-domain contracts for the file vault.
//!
//! This crate is the API boundary between the vault core and whatever host it
//! runs on. It exposes storage, preference, notification, and object-URL
//! service traits together with `Noop*` and `Memory*` adapters for tests and
//! unsupported targets, while concrete browser adapters live in
//! `vault_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod blob;
pub mod ingest;
pub mod notifications;
pub mod storage;
pub mod time;

pub use blob::{NoopObjectUrlService, ObjectUrlService};
pub use ingest::IngestedRead;
pub use notifications::{
    NoopNotificationService, NotificationFuture, NotificationService,
};
pub use storage::{
    load_prefs_with, save_prefs_with, MemoryPrefsStore, MemoryRegistryStore, NoopPrefsStore,
    NoopRegistryStore, PrefsStore, RegistryStore, StoreError, StoreFuture, PREFS_STORAGE_KEY,
    REGISTRY_STORAGE_KEY,
};
pub use time::{next_record_stamp, wall_clock_unix_ms, RecordStamp};
