//! Raw file payloads delivered by host read operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One completed asynchronous file read, before registry admission.
///
/// Produced only by a successful read: a failed read yields an error on the
/// ingestion future and never materializes one of these.
pub struct IngestedRead {
    /// Original filename; may be empty.
    pub name: String,
    /// Declared MIME type; may be empty for unknown types.
    pub mime: String,
    /// Byte count of the source file.
    pub size: u64,
    /// Source last-modified time in unix milliseconds when available.
    pub last_modified_unix_ms: Option<u64>,
    /// File content as a `data:<mime>;base64,<payload>` data URI.
    pub data_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingested_read_serde_round_trips() {
        let read = IngestedRead {
            name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
            size: 5,
            last_modified_unix_ms: Some(1_700_000_000_000),
            data_url: "data:text/plain;base64,SGVsbG8=".to_string(),
        };
        let raw = serde_json::to_string(&read).expect("serialize");
        let back: IngestedRead = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(back, read);
    }
}
