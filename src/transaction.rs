/*!
The transaction row stored for every recorded income/expense, and the fixed
civil-timezone clock all bucketing runs against.
*/

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamps are stored as `YYYY-MM-DD HH:MM:SS`. Period filtering relies on
/// this format being lexicographically sortable, so it must never change
/// without also changing every string comparison in the report module.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// All bucketing uses a single fixed UTC+7 offset (WIB), no DST.
pub fn wib() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap()
}

pub fn now_wib() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&wib())
}

/// A single recorded transaction. Rows are created once at parse time and
/// never mutated or deleted; the full history is the only state.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Formatted with [`TIMESTAMP_FORMAT`], in WIB.
    pub timestamp: String,

    /// Normalized taxonomy label, always lower-cased. Unrecognized categories
    /// pass through unchanged.
    pub category: String,

    /// Free text, no invariants.
    pub description: String,

    /// Whole Rupiah. Positive = income, negative = expense, never 0.
    pub amount: i64,

    /// Opaque origin identifier, e.g. `telegram_<user>`. Provenance only.
    pub source: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > 0
    }

    /// Parses the stored timestamp back into a date-time. Rows with a
    /// malformed timestamp return `None` and are skipped by the reports that
    /// need calendar fields.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}
