use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable menu item belonging to one category.
///
/// Stored in the remote catalog under `items/{id}`; the cart only ever
/// snapshots `id`, `name` and `price`, so an item edited mid-session
/// does not change lines already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (client-generated)
    pub id: String,

    /// Id of the owning category
    pub category_id: String,

    /// Display name (non-empty, trimmed)
    pub name: String,

    /// Unit price in the shop currency (positive, finite)
    pub price: f64,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional image reference (URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Item {
    pub fn new(
        category_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        description: Option<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category_id: category_id.into(),
            name: name.into(),
            price,
            description,
            image,
        }
    }
}

/// Partial update applied to an existing item. The owning category is
/// fixed at creation and never changed by an edit.
#[derive(Debug, Clone, Serialize)]
pub struct ItemUpdate {
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
