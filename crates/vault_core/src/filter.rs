//! Pure filtering over registry snapshots.

use serde::{Deserialize, Serialize};

use crate::record::FileRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Five-way MIME family selector for the file list.
pub enum TypeSelector {
    /// Pass every record.
    #[default]
    All,
    /// MIME types starting with `image/`.
    Image,
    /// MIME types starting with `text/`.
    Text,
    /// MIME types starting with `application/`.
    Application,
    /// Everything else, including empty/unknown types.
    Other,
}

impl TypeSelector {
    /// Stable token used by the `<select>` control and prefs persistence.
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Image => "image",
            Self::Text => "text",
            Self::Application => "application",
            Self::Other => "other",
        }
    }

    /// Parses a control token back into a selector.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "all" => Some(Self::All),
            "image" => Some(Self::Image),
            "text" => Some(Self::Text),
            "application" => Some(Self::Application),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Whether a declared MIME type falls under this selector.
    ///
    /// `Other` is the complement of the three named families, so the five
    /// selectors partition all records and `audio/`/`video/` types land in
    /// `Other`.
    pub fn matches(self, mime: &str) -> bool {
        match self {
            Self::All => true,
            Self::Image => mime.starts_with("image/"),
            Self::Text => mime.starts_with("text/"),
            Self::Application => mime.starts_with("application/"),
            Self::Other => {
                !mime.starts_with("image/")
                    && !mime.starts_with("text/")
                    && !mime.starts_with("application/")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
/// Persisted filter controls state.
pub struct FilterPrefs {
    /// Selected MIME family.
    pub selector: TypeSelector,
    /// Maximum size bound in bytes; `0` means unbounded.
    pub max_size: u64,
}

/// Returns the records passing `selector` and the size bound, in input order.
///
/// A `max_size` of zero means no size constraint; otherwise records strictly
/// larger than the bound are excluded. Input is never mutated or re-sorted.
pub fn filter_records(
    records: &[FileRecord],
    selector: TypeSelector,
    max_size: u64,
) -> Vec<FileRecord> {
    records
        .iter()
        .filter(|record| selector.matches(&record.kind))
        .filter(|record| max_size == 0 || record.size <= max_size)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str, kind: &str, size: u64) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            name: format!("{id}.bin"),
            kind: kind.to_string(),
            size,
            last_modified: None,
            data: "data:;base64,".to_string(),
            date: "2026-08-27T00:00:00.000Z".to_string(),
        }
    }

    fn ids(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn all_with_zero_bound_is_identity() {
        let records = vec![
            record("a", "image/png", 10),
            record("b", "", 20),
            record("c", "text/plain", 30),
        ];
        let filtered = filter_records(&records, TypeSelector::All, 0);
        assert_eq!(filtered, records);
    }

    #[test]
    fn family_selectors_match_prefixes() {
        let records = vec![
            record("img", "image/png", 1),
            record("txt", "text/plain", 1),
            record("app", "application/pdf", 1),
            record("aud", "audio/mpeg", 1),
            record("unk", "", 1),
        ];

        assert_eq!(
            ids(&filter_records(&records, TypeSelector::Image, 0)),
            vec!["img"]
        );
        assert_eq!(
            ids(&filter_records(&records, TypeSelector::Text, 0)),
            vec!["txt"]
        );
        assert_eq!(
            ids(&filter_records(&records, TypeSelector::Application, 0)),
            vec!["app"]
        );
    }

    #[test]
    fn other_includes_unknown_and_uncommon_top_level_types() {
        let records = vec![
            record("img", "image/png", 1),
            record("aud", "audio/mpeg", 1),
            record("unk", "", 1),
        ];
        assert_eq!(
            ids(&filter_records(&records, TypeSelector::Other, 0)),
            vec!["aud", "unk"]
        );
    }

    #[test]
    fn size_bound_is_inclusive() {
        let records = vec![record("fits", "text/plain", 100), record("big", "text/plain", 101)];
        assert_eq!(
            ids(&filter_records(&records, TypeSelector::All, 100)),
            vec!["fits"]
        );
    }

    #[test]
    fn filter_preserves_insertion_order() {
        let records = vec![
            record("c", "text/plain", 3),
            record("a", "text/plain", 1),
            record("b", "text/plain", 2),
        ];
        assert_eq!(
            ids(&filter_records(&records, TypeSelector::Text, 0)),
            vec!["c", "a", "b"]
        );
    }

    #[test]
    fn selector_tokens_round_trip_through_serde_and_from_token() {
        for selector in [
            TypeSelector::All,
            TypeSelector::Image,
            TypeSelector::Text,
            TypeSelector::Application,
            TypeSelector::Other,
        ] {
            assert_eq!(TypeSelector::from_token(selector.as_token()), Some(selector));
            let json = serde_json::to_string(&selector).expect("serialize");
            assert_eq!(json, format!("\"{}\"", selector.as_token()));
        }
        assert_eq!(TypeSelector::from_token("video"), None);
    }
}
