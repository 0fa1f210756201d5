//! Vault error taxonomy.

use thiserror::Error;
use vault_host::StoreError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures the vault can surface to callers.
///
/// Nothing here is fatal: parse failures are recovered at load, quota and
/// read failures abandon the triggering operation with prior state intact,
/// and malformed stored data degrades the viewer to a summary.
pub enum VaultError {
    /// The source file could not be read during ingestion.
    #[error("file read failed: {0}")]
    Read(String),
    /// The persisted registry document could not be parsed.
    #[error("persisted registry is not valid JSON: {0}")]
    Parse(String),
    /// The backing store rejected a write for capacity reasons.
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// The backing store is unavailable or failed outright.
    #[error("storage failure: {0}")]
    Storage(String),
    /// A stored record's data URI cannot be decoded.
    #[error("malformed data uri: {0}")]
    MalformedData(String),
}

impl From<StoreError> for VaultError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::QuotaExceeded => Self::QuotaExceeded,
            StoreError::Unavailable(detail) | StoreError::Backend(detail) => Self::Storage(detail),
        }
    }
}
