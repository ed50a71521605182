use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::sale::Sale;

/// Which slice of the sales history the report shows.
///
/// All variants compare local **calendar dates**, not rolling time
/// windows: a sale at 23:59 and one at 00:01 the next minute fall on
/// different days even though they are two minutes apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportFilter {
    /// Every recorded sale
    All,
    /// Sales whose calendar date is the current date
    Today,
    /// Sales within the current calendar month
    ThisMonth,
    /// Sales on one specific calendar date
    ByDate(NaiveDate),
}

impl ReportFilter {
    /// Does `sale` pass this filter, with `today` as the reference date?
    ///
    /// `today` is threaded in rather than read from the clock so the
    /// predicate stays pure.
    #[must_use]
    pub fn matches(&self, sale: &Sale, today: NaiveDate) -> bool {
        let Some(sale_date) = sale.local_date() else {
            return matches!(self, ReportFilter::All);
        };
        match self {
            ReportFilter::All => true,
            ReportFilter::Today => sale_date == today,
            ReportFilter::ThisMonth => {
                sale_date.year() == today.year() && sale_date.month() == today.month()
            }
            ReportFilter::ByDate(date) => sale_date == *date,
        }
    }
}

/// Aggregates over a filtered set of sales, as shown in the report
/// summary box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Number of sales in the filtered set
    pub orders: usize,

    /// Sum of each sale's precomputed total (not recomputed from lines)
    pub total_revenue: f64,
}
