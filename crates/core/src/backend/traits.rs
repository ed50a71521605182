use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::category::{Category, CategoryUpdate};
use crate::models::item::{Item, ItemUpdate};
use crate::models::sale::Sale;

/// The remote store of categories and menu items.
///
/// The core only ever sees full snapshots from here (the backend pushes
/// replacements, not deltas); mutations are fire-and-confirm writes.
/// Swapping the hosted database means replacing one implementation of
/// this trait — the rest of the codebase is untouched.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the current set of categories. An absent collection is an
    /// empty list, not an error.
    async fn fetch_categories(&self) -> Result<Vec<Category>, CoreError>;

    /// Fetch the current set of items across all categories.
    async fn fetch_items(&self) -> Result<Vec<Item>, CoreError>;

    /// Store a new category under its id.
    async fn put_category(&self, category: &Category) -> Result<(), CoreError>;

    /// Apply a partial update to an existing category.
    async fn update_category(&self, id: &str, update: &CategoryUpdate) -> Result<(), CoreError>;

    /// Delete a category. Items referencing it are left in place.
    async fn delete_category(&self, id: &str) -> Result<(), CoreError>;

    /// Store a new item under its id.
    async fn put_item(&self, item: &Item) -> Result<(), CoreError>;

    /// Apply a partial update to an existing item.
    async fn update_item(&self, id: &str, update: &ItemUpdate) -> Result<(), CoreError>;

    /// Delete an item.
    async fn delete_item(&self, id: &str) -> Result<(), CoreError>;
}

/// The durable, append-only store of finalized sales.
#[async_trait]
pub trait SalesSink: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Append one finalized sale. Succeeds or fails atomically from the
    /// caller's point of view; the record is never mutated afterwards.
    async fn append_sale(&self, sale: &Sale) -> Result<(), CoreError>;

    /// Fetch every recorded sale, in no particular order.
    async fn fetch_sales(&self) -> Result<Vec<Sale>, CoreError>;

    /// Remove every recorded sale. Irreversible.
    async fn clear_all_sales(&self) -> Result<(), CoreError>;
}

/// User-facing yes/no prompt, supplied by the embedding UI.
/// Gates destructive bulk operations (clearing the sales history);
/// checkout itself is not gated.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Present `title`/`message` and return `true` on confirm,
    /// `false` on cancel.
    async fn confirm(&self, title: &str, message: &str) -> bool;
}
