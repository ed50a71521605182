use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Terminal-level configuration, constructed once at startup and handed
/// to the façade. No module-level state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Fixed symbol prefixed to displayed amounts (no locale formatting).
    pub currency_symbol: String,

    /// How long a checkout may wait on the sales store before it is
    /// reported as timed out, in seconds.
    pub checkout_timeout_secs: u64,
}

impl Settings {
    /// Checkout timeout as a [`Duration`].
    #[must_use]
    pub fn checkout_timeout(&self) -> Duration {
        Duration::from_secs(self.checkout_timeout_secs)
    }

    /// Format an amount for display: symbol followed by the native
    /// numeric rendering (`฿130`, `฿7.5`).
    #[must_use]
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "฿".to_string(),
            checkout_timeout_secs: 30,
        }
    }
}
