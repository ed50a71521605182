//! Read-only projections of the remote store.
//!
//! Every backend push replaces a view's contents wholesale; nothing
//! else writes to them. The cart is deliberately *not* part of any
//! view, so a catalog or sales push can never clobber an in-progress
//! order.

use crate::models::category::Category;
use crate::models::item::Item;
use crate::models::sale::Sale;

/// Latest known snapshot of the catalog: categories and items.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    categories: Vec<Category>,
    items: Vec<Item>,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the category list with a fresh snapshot.
    /// Categories are kept sorted by `order`, then name.
    pub fn replace_categories(&mut self, mut categories: Vec<Category>) {
        categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        self.categories = categories;
    }

    /// Replace the item list with a fresh snapshot.
    pub fn replace_items(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    /// All categories, in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All items, in backend order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items belonging to one category, in backend order.
    #[must_use]
    pub fn items_in(&self, category_id: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| i.category_id == category_id)
            .collect()
    }
}

/// Latest known snapshot of the sales history, newest first.
#[derive(Debug, Clone, Default)]
pub struct SalesView {
    sales: Vec<Sale>,
}

impl SalesView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sales list with a fresh snapshot, sorted newest first.
    pub fn replace(&mut self, mut sales: Vec<Sale>) {
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.sales = sales;
    }

    /// All known sales, newest first.
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Forget every sale (after a confirmed bulk clear).
    pub fn clear(&mut self) {
        self.sales.clear();
    }
}
