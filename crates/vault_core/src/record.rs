//! Stored file record model and id generation.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use vault_host::{next_record_stamp, IngestedRead};

/// Generates a fresh record id from an ingestion stamp: monotonic unix
/// milliseconds plus the session sequence number, so two ingestions
/// completing in the same millisecond still receive distinct ids.
pub fn next_record_id() -> String {
    let stamp = next_record_stamp();
    format!("{}-{}", stamp.unix_ms, stamp.sequence)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One stored file: metadata plus content as a base64 data URI.
///
/// Field names on the wire match the inherited persisted layout, including
/// `type` for the MIME string.
pub struct FileRecord {
    /// Unique record id within the registry.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Original filename; may be empty.
    pub name: String,
    /// Declared MIME type; may be empty for unknown types.
    #[serde(rename = "type")]
    pub kind: String,
    /// Byte count of the source file.
    pub size: u64,
    /// Source last-modified time in unix milliseconds when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<u64>,
    /// Content as a `data:<mime>;base64,<payload>` data URI.
    pub data: String,
    /// Ingestion timestamp, RFC 3339 UTC.
    pub date: String,
}

impl FileRecord {
    /// Builds a record from a completed host read, stamping id and date.
    pub fn from_read(read: IngestedRead) -> Self {
        Self {
            id: next_record_id(),
            name: read.name,
            kind: read.mime,
            size: read.size,
            last_modified: read.last_modified_unix_ms,
            data: read.data_url,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

// Older persisted records carry numeric `Date.now()`-style ids.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Number(u64),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(id) => id,
        IdRepr::Number(id) => id.to_string(),
    })
}
