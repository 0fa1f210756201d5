//! Per-record presentation dispatch.

use crate::{data_uri::DataUri, record::FileRecord};

/// Maximum characters shown in a text preview before truncation.
pub const TEXT_PREVIEW_CHAR_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// How one record should be presented.
pub enum ViewPlan {
    /// Display decoded image bytes inline.
    Image {
        /// MIME type for the ephemeral display resource.
        mime: String,
        /// Decoded image content.
        bytes: Vec<u8>,
    },
    /// Show a capped text preview.
    TextPreview {
        /// Preview text, at most [`TEXT_PREVIEW_CHAR_LIMIT`] characters.
        text: String,
        /// Whether the source was longer than the preview.
        truncated: bool,
    },
    /// Offer the decoded bytes as a download named after the source file.
    Download {
        /// Download filename.
        name: String,
        /// MIME type for the ephemeral download resource.
        mime: String,
        /// Decoded file content.
        bytes: Vec<u8>,
    },
    /// Plain metadata summary, used when content cannot be decoded.
    Summary {
        /// Original filename.
        name: String,
        /// Declared MIME type, possibly empty.
        kind: String,
        /// Byte count.
        size: u64,
    },
}

/// Decides how to present `record` based on its declared MIME type.
///
/// Decode failures never propagate: a record whose stored data URI is
/// malformed degrades to [`ViewPlan::Summary`], with the failure logged.
pub fn plan_view(record: &FileRecord) -> ViewPlan {
    match try_plan_view(record) {
        Ok(plan) => plan,
        Err(err) => {
            leptos::logging::warn!("viewing {:?} fell back to summary: {err}", record.name);
            summary_of(record)
        }
    }
}

fn try_plan_view(record: &FileRecord) -> Result<ViewPlan, crate::VaultError> {
    let uri = DataUri::parse(&record.data)?;
    if record.kind.starts_with("image/") {
        Ok(ViewPlan::Image {
            mime: uri.mime().to_string(),
            bytes: uri.decode_bytes()?,
        })
    } else if record.kind.starts_with("text/") {
        let full = uri.decode_text()?;
        let text: String = full.chars().take(TEXT_PREVIEW_CHAR_LIMIT).collect();
        let truncated = full.chars().count() > TEXT_PREVIEW_CHAR_LIMIT;
        Ok(ViewPlan::TextPreview { text, truncated })
    } else {
        Ok(ViewPlan::Download {
            name: record.name.clone(),
            mime: uri.mime().to_string(),
            bytes: uri.decode_bytes()?,
        })
    }
}

fn summary_of(record: &FileRecord) -> ViewPlan {
    ViewPlan::Summary {
        name: record.name.clone(),
        kind: record.kind.clone(),
        size: record.size,
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(name: &str, kind: &str, data: &str) -> FileRecord {
        FileRecord {
            id: "1-1".to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            size: 5,
            last_modified: None,
            data: data.to_string(),
            date: "2026-08-27T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn text_records_preview_decoded_content() {
        let plan = plan_view(&record("hi.txt", "text/plain", "data:text/plain;base64,SGVsbG8="));
        assert_eq!(
            plan,
            ViewPlan::TextPreview {
                text: "Hello".to_string(),
                truncated: false,
            }
        );
    }

    #[test]
    fn long_text_is_capped_at_the_preview_limit() {
        let source = "é".repeat(TEXT_PREVIEW_CHAR_LIMIT + 5);
        let data = format!("data:text/plain;base64,{}", STANDARD.encode(source.as_bytes()));
        let plan = plan_view(&record("long.txt", "text/plain", &data));

        let ViewPlan::TextPreview { text, truncated } = plan else {
            panic!("expected text preview");
        };
        assert!(truncated);
        assert_eq!(text.chars().count(), TEXT_PREVIEW_CHAR_LIMIT);
    }

    #[test]
    fn image_records_decode_to_inline_bytes() {
        let data = format!("data:image/png;base64,{}", STANDARD.encode([1u8, 2, 3]));
        let plan = plan_view(&record("dot.png", "image/png", &data));
        assert_eq!(
            plan,
            ViewPlan::Image {
                mime: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            }
        );
    }

    #[test]
    fn unknown_types_become_downloads() {
        let data = format!(
            "data:application/octet-stream;base64,{}",
            STANDARD.encode(b"blob")
        );
        let plan = plan_view(&record("raw.bin", "", &data));
        assert_eq!(
            plan,
            ViewPlan::Download {
                name: "raw.bin".to_string(),
                mime: "application/octet-stream".to_string(),
                bytes: b"blob".to_vec(),
            }
        );
    }

    #[test]
    fn malformed_data_degrades_to_summary() {
        let plan = plan_view(&record("broken.txt", "text/plain", "data:text/plain;base64"));
        assert_eq!(
            plan,
            ViewPlan::Summary {
                name: "broken.txt".to_string(),
                kind: "text/plain".to_string(),
                size: 5,
            }
        );
    }

    #[test]
    fn bad_base64_in_an_image_degrades_to_summary() {
        let plan = plan_view(&record("bad.png", "image/png", "data:image/png;base64,@@@@"));
        assert!(matches!(plan, ViewPlan::Summary { .. }));
    }
}
