use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::cart::CartLine;

/// Format used for the human-readable `date` field.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A finalized, immutable record of one completed checkout.
///
/// Created once at checkout time and appended to the sales store; after
/// that this library never mutates it — the only write path touching
/// existing sales is the bulk clear on the report screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Identifier derived from the creation instant (epoch milliseconds)
    pub id: String,

    /// Frozen copy of the cart lines at checkout
    pub items: Vec<CartLine>,

    /// Total charged, precomputed at checkout
    pub total: f64,

    /// Human-readable local time of the sale
    pub date: String,

    /// Machine-sortable creation instant, epoch milliseconds
    pub timestamp: i64,
}

impl Sale {
    /// Freeze a cart into a sale record at instant `at`.
    pub fn new(items: Vec<CartLine>, total: f64, at: DateTime<Local>) -> Self {
        let timestamp = at.timestamp_millis();
        Self {
            id: timestamp.to_string(),
            items,
            total,
            date: at.format(DISPLAY_FORMAT).to_string(),
            timestamp,
        }
    }

    /// Local calendar date of the sale, recovered from `timestamp`.
    ///
    /// `None` only for a timestamp outside the representable range
    /// (a corrupted record); such sales match no date filter.
    #[must_use]
    pub fn local_date(&self) -> Option<NaiveDate> {
        Local
            .timestamp_millis_opt(self.timestamp)
            .single()
            .map(|dt| dt.date_naive())
    }
}
