//! Ingestion stamp issuance.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One issued ingestion stamp.
///
/// `unix_ms` values strictly increase within the process even when the
/// system clock stalls or steps backwards, and `sequence` numbers every
/// stamp handed out this session. Record ids are built from both fields.
pub struct RecordStamp {
    /// Monotonic unix timestamp in milliseconds.
    pub unix_ms: u64,
    /// Per-session ordinal, starting at 1.
    pub sequence: u64,
}

thread_local! {
    static LAST_STAMP: Cell<RecordStamp> = const {
        Cell::new(RecordStamp {
            unix_ms: 0,
            sequence: 0,
        })
    };
}

/// Returns the current unix timestamp in milliseconds.
pub fn wall_clock_unix_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Issues the next ingestion stamp.
pub fn next_record_stamp() -> RecordStamp {
    let now = wall_clock_unix_ms();
    LAST_STAMP.with(|last| {
        let prior = last.get();
        let stamp = RecordStamp {
            unix_ms: now.max(prior.unix_ms.saturating_add(1)),
            sequence: prior.sequence.saturating_add(1),
        };
        last.set(stamp);
        stamp
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_strictly_increase_in_both_fields() {
        let first = next_record_stamp();
        let second = next_record_stamp();
        let third = next_record_stamp();
        assert!(second.unix_ms > first.unix_ms);
        assert!(third.unix_ms > second.unix_ms);
        assert_eq!(second.sequence, first.sequence + 1);
        assert_eq!(third.sequence, second.sequence + 1);
    }

    #[test]
    fn stamps_never_lag_the_wall_clock() {
        let wall = wall_clock_unix_ms();
        assert!(next_record_stamp().unix_ms >= wall);
    }
}
