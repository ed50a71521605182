use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Icon shown when a category record carries no icon of its own.
pub const DEFAULT_CATEGORY_ICON: &str = "food";

/// A menu category ("Main Dishes", "Drinks", ...).
///
/// Stored in the remote catalog under `categories/{id}`. Field names on
/// the wire are the database's camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier (client-generated)
    pub id: String,

    /// Display name (non-empty, trimmed)
    pub name: String,

    /// Icon slug (e.g., "hamburger", "coffee"). May be absent in old records.
    #[serde(default)]
    pub icon: String,

    /// Sort position on the selling screen (1-based)
    pub order: u32,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, order: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            icon: icon.into(),
            order,
            created_at: Utc::now(),
        }
    }

    /// Icon slug for display, falling back to [`DEFAULT_CATEGORY_ICON`]
    /// when the record has none.
    #[must_use]
    pub fn icon_or_default(&self) -> &str {
        if self.icon.is_empty() {
            DEFAULT_CATEGORY_ICON
        } else {
            &self.icon
        }
    }
}

/// Partial update applied to an existing category (name and icon only —
/// the sort order and creation date are never touched by an edit).
#[derive(Debug, Clone, Serialize)]
pub struct CategoryUpdate {
    pub name: String,
    pub icon: String,
}
