pub mod backend;
pub mod errors;
pub mod models;
pub mod services;
pub mod views;

use std::sync::Arc;

use chrono::Local;

use backend::traits::{CatalogSource, ConfirmationPrompt, SalesSink};
use errors::CoreError;
use models::cart::{Cart, CartLine};
use models::category::Category;
use models::item::Item;
use models::report::{ReportFilter, SalesSummary};
use models::sale::Sale;
use models::settings::Settings;
use services::catalog_service::CatalogService;
use services::checkout_service::CheckoutService;
use services::report_service::ReportService;
use views::{CatalogView, SalesView};

/// Main entry point for the pos-core library.
///
/// One terminal = one selling session: it owns the cart, the read-only
/// views over the remote store, and the services that operate on them.
/// The backend handles are passed in at construction (no globals) and
/// shared with the watch subscriptions by the embedding UI.
///
/// All cart mutation goes through `&mut self`, so a checkout in flight
/// holds the borrow and no concurrent add/remove can exist.
#[must_use]
pub struct PosTerminal {
    settings: Settings,
    catalog_source: Arc<dyn CatalogSource>,
    sales_sink: Arc<dyn SalesSink>,
    catalog: CatalogView,
    sales: SalesView,
    cart: Cart,
    selected_category: Option<String>,
    catalog_service: CatalogService,
    checkout_service: CheckoutService,
    report_service: ReportService,
}

impl std::fmt::Debug for PosTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosTerminal")
            .field("categories", &self.catalog.categories().len())
            .field("items", &self.catalog.items().len())
            .field("sales", &self.sales.sales().len())
            .field("cart_lines", &self.cart.line_count())
            .field("selected_category", &self.selected_category)
            .finish()
    }
}

impl PosTerminal {
    /// Create a terminal with default settings.
    pub fn new(catalog_source: Arc<dyn CatalogSource>, sales_sink: Arc<dyn SalesSink>) -> Self {
        Self::with_settings(catalog_source, sales_sink, Settings::default())
    }

    /// Create a terminal with explicit settings.
    pub fn with_settings(
        catalog_source: Arc<dyn CatalogSource>,
        sales_sink: Arc<dyn SalesSink>,
        settings: Settings,
    ) -> Self {
        Self {
            settings,
            catalog_source,
            sales_sink,
            catalog: CatalogView::new(),
            sales: SalesView::new(),
            cart: Cart::new(),
            selected_category: None,
            catalog_service: CatalogService::new(),
            checkout_service: CheckoutService::new(),
            report_service: ReportService::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Display an amount with the fixed shop currency symbol.
    #[must_use]
    pub fn format_amount(&self, amount: f64) -> String {
        self.settings.format_amount(amount)
    }

    /// Backend handle for wiring catalog watchers.
    #[must_use]
    pub fn catalog_source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.catalog_source)
    }

    /// Backend handle for wiring the sales watcher.
    #[must_use]
    pub fn sales_sink(&self) -> Arc<dyn SalesSink> {
        Arc::clone(&self.sales_sink)
    }

    // ── View Sync ───────────────────────────────────────────────────

    /// Apply a pushed category snapshot. A selection pointing at a
    /// category that no longer exists is dropped.
    pub fn apply_categories(&mut self, categories: Vec<Category>) {
        self.catalog.replace_categories(categories);
        if let Some(id) = &self.selected_category {
            if self.catalog.category(id).is_none() {
                self.selected_category = None;
            }
        }
    }

    /// Apply a pushed item snapshot. Never touches the cart.
    pub fn apply_items(&mut self, items: Vec<Item>) {
        self.catalog.replace_items(items);
    }

    /// Apply a pushed sales snapshot (stored newest first).
    pub fn apply_sales(&mut self, sales: Vec<Sale>) {
        self.sales.replace(sales);
    }

    /// Pull the current catalog from the backend once and apply it.
    pub async fn refresh_catalog(&mut self) -> Result<(), CoreError> {
        let categories = self.catalog_source.fetch_categories().await?;
        let items = self.catalog_source.fetch_items().await?;
        self.apply_categories(categories);
        self.apply_items(items);
        Ok(())
    }

    /// Pull the current sales history from the backend once and apply it.
    pub async fn refresh_sales(&mut self) -> Result<(), CoreError> {
        let sales = self.sales_sink.fetch_sales().await?;
        self.apply_sales(sales);
        Ok(())
    }

    // ── Selling ─────────────────────────────────────────────────────

    /// Categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    /// Select the category whose items the selling screen shows.
    pub fn select_category(&mut self, id: &str) -> Result<(), CoreError> {
        if self.catalog.category(id).is_none() {
            return Err(CoreError::CategoryNotFound(id.to_string()));
        }
        self.selected_category = Some(id.to_string());
        Ok(())
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<&Category> {
        self.selected_category
            .as_deref()
            .and_then(|id| self.catalog.category(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected_category = None;
    }

    /// Items of the selected category; empty until one is selected.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&Item> {
        match &self.selected_category {
            Some(id) => self.catalog.items_in(id),
            None => Vec::new(),
        }
    }

    /// All catalog items, regardless of category.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.catalog.items()
    }

    /// Items of one category (the category-detail listing).
    #[must_use]
    pub fn items_in(&self, category_id: &str) -> Vec<&Item> {
        self.catalog.items_in(category_id)
    }

    /// Add one unit of a catalog item to the cart.
    pub fn add_to_cart(&mut self, item_id: &str) -> Result<(), CoreError> {
        let item = self
            .catalog
            .item(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        self.cart.add(item);
        Ok(())
    }

    /// Remove one unit from the cart. Unknown ids are a no-op.
    pub fn remove_from_cart(&mut self, item_id: &str) {
        self.cart.remove(item_id);
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Running total of the cart.
    #[must_use]
    pub fn cart_total(&self) -> f64 {
        self.cart.total()
    }

    /// Number of distinct cart lines (what the "View Cart (n)" badge shows).
    #[must_use]
    pub fn cart_line_count(&self) -> usize {
        self.cart.line_count()
    }

    #[must_use]
    pub fn cart_is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Discard the in-progress order without selling it.
    pub fn reset_cart(&mut self) {
        self.cart.clear();
    }

    /// Finalize the cart as a sale in the sales store.
    ///
    /// On success the cart is empty and the committed [`Sale`] is
    /// returned (the report view catches up on the next push or
    /// [`refresh_sales`](Self::refresh_sales)). On failure the cart is
    /// exactly as it was.
    pub async fn checkout(&mut self) -> Result<Sale, CoreError> {
        let timeout = self.settings.checkout_timeout();
        self.checkout_service
            .checkout(&mut self.cart, self.sales_sink.as_ref(), timeout)
            .await
    }

    // ── Reporting ───────────────────────────────────────────────────

    /// All known sales, newest first.
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        self.sales.sales()
    }

    /// Sales passing `filter`, judged against today's local date.
    #[must_use]
    pub fn filtered_sales(&self, filter: &ReportFilter) -> Vec<&Sale> {
        let today = Local::now().date_naive();
        self.report_service.filter(self.sales.sales(), filter, today)
    }

    /// Order count and revenue for the filtered slice.
    #[must_use]
    pub fn sales_report(&self, filter: &ReportFilter) -> SalesSummary {
        let filtered = self.filtered_sales(filter);
        self.report_service.summarize(&filtered)
    }

    /// Delete the entire sales history after user confirmation.
    /// Returns whether the deletion actually happened.
    pub async fn clear_all_sales(
        &mut self,
        prompt: &dyn ConfirmationPrompt,
    ) -> Result<bool, CoreError> {
        let cleared = self
            .report_service
            .clear_all(self.sales_sink.as_ref(), prompt)
            .await?;
        if cleared {
            self.sales.clear();
        }
        Ok(cleared)
    }

    // ── Menu Management ─────────────────────────────────────────────

    /// Create a category. The catalog view catches up on the next push.
    pub async fn add_category(
        &self,
        name: &str,
        icon: &str,
        order: u32,
    ) -> Result<Category, CoreError> {
        self.catalog_service
            .add_category(self.catalog_source.as_ref(), name, icon, order)
            .await
    }

    /// Rename a category and/or change its icon.
    pub async fn rename_category(
        &self,
        id: &str,
        name: &str,
        icon: &str,
    ) -> Result<(), CoreError> {
        self.catalog_service
            .rename_category(self.catalog_source.as_ref(), id, name, icon)
            .await
    }

    /// Delete a category (its items stay behind, unlisted).
    pub async fn delete_category(&self, id: &str) -> Result<(), CoreError> {
        self.catalog_service
            .delete_category(self.catalog_source.as_ref(), id)
            .await
    }

    /// Create an item inside a category.
    pub async fn add_item(
        &self,
        category_id: &str,
        name: &str,
        price: f64,
        description: Option<String>,
        image: Option<String>,
    ) -> Result<Item, CoreError> {
        self.catalog_service
            .add_item(
                self.catalog_source.as_ref(),
                category_id,
                name,
                price,
                description,
                image,
            )
            .await
    }

    /// Edit an item's name, price, description or image.
    pub async fn update_item(
        &self,
        id: &str,
        name: &str,
        price: f64,
        description: Option<String>,
        image: Option<String>,
    ) -> Result<(), CoreError> {
        self.catalog_service
            .update_item(
                self.catalog_source.as_ref(),
                id,
                name,
                price,
                description,
                image,
            )
            .await
    }

    /// Delete an item.
    pub async fn delete_item(&self, id: &str) -> Result<(), CoreError> {
        self.catalog_service
            .delete_item(self.catalog_source.as_ref(), id)
            .await
    }
}
