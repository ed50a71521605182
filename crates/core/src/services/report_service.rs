use chrono::NaiveDate;

use crate::backend::traits::{ConfirmationPrompt, SalesSink};
use crate::errors::CoreError;
use crate::models::report::{ReportFilter, SalesSummary};
use crate::models::sale::Sale;

/// Title/message of the destructive bulk-clear prompt.
const CLEAR_TITLE: &str = "Clear All Bills";
const CLEAR_MESSAGE: &str = "Are you sure to delete all sales?";

/// Slices and aggregates the sales history for the report screen.
///
/// Filtering and summing are pure; the only side effect here is the
/// confirmed bulk clear.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Sales passing `filter`, with `today` as the reference date.
    /// Input order is preserved (the view hands these over newest first).
    pub fn filter<'a>(
        &self,
        sales: &'a [Sale],
        filter: &ReportFilter,
        today: NaiveDate,
    ) -> Vec<&'a Sale> {
        sales.iter().filter(|s| filter.matches(s, today)).collect()
    }

    /// Count and revenue of an already-filtered set. Revenue is the sum
    /// of each sale's stored total — line items are not recomputed.
    pub fn summarize(&self, filtered: &[&Sale]) -> SalesSummary {
        SalesSummary {
            orders: filtered.len(),
            total_revenue: filtered.iter().map(|s| s.total).sum(),
        }
    }

    /// Delete the entire sales history, after an explicit confirmation.
    ///
    /// Returns `Ok(false)` without touching the backend when the user
    /// cancels. Irreversible once confirmed; there is no soft-delete.
    pub async fn clear_all(
        &self,
        sink: &dyn SalesSink,
        prompt: &dyn ConfirmationPrompt,
    ) -> Result<bool, CoreError> {
        if !prompt.confirm(CLEAR_TITLE, CLEAR_MESSAGE).await {
            return Ok(false);
        }
        sink.clear_all_sales().await?;
        Ok(true)
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
