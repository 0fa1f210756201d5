//! File vault core: record model, registry, filtering, and viewer dispatch.
//!
//! Everything here is host-agnostic. Persistence and user interaction flow
//! through the `vault_host` service contracts, so the registry and filter
//! logic run identically in tests, on non-wasm targets, and in the browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod data_uri;
pub mod error;
pub mod filter;
pub mod record;
pub mod registry;
pub mod viewer;

pub use data_uri::DataUri;
pub use error::VaultError;
pub use filter::{filter_records, FilterPrefs, TypeSelector};
pub use record::{next_record_id, FileRecord};
pub use registry::FileRegistry;
pub use viewer::{plan_view, ViewPlan, TEXT_PREVIEW_CHAR_LIMIT};
