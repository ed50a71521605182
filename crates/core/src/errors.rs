use thiserror::Error;

/// Unified error type for the entire pos-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Nothing in here is fatal: the caller surfaces the message and the
/// selling session keeps running.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No items selected")]
    EmptyCart,

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    // ── Backend ─────────────────────────────────────────────────────
    #[error("Backend write failed: {0}")]
    BackendWrite(String),

    #[error("Backend read failed: {0}")]
    BackendRead(String),

    #[error("Checkout timed out after {0}s — the sale was not confirmed")]
    CheckoutTimeout(u64),

    // ── Network / API ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error at '{path}': {message}")]
    Api {
        path: String,
        message: String,
    },

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so the
        // database auth token never ends up in a user-visible message.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
