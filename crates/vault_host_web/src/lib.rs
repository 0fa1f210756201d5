//! Browser (`wasm32`) implementations of the `vault_host` service contracts.
//!
//! localStorage persistence, `FileReader` ingestion, object-URL minting with
//! a timed revoke, and `window.alert`/`window.confirm` notifications. All
//! adapters compile on non-wasm targets with inert fallbacks so the rest of
//! the workspace tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod blob;
pub mod ingest;
pub mod notifications;
pub mod storage;

pub use blob::{WebObjectUrlService, OBJECT_URL_TTL_MS};
pub use ingest::read_file_to_data_url;
pub use notifications::WebNotificationService;
pub use storage::{WebPrefsStore, WebRegistryStore};
