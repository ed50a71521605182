// ═══════════════════════════════════════════════════════════════════
// Service Tests — CatalogService, CheckoutService, ReportService,
// and the polling watch subscriptions
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{Local, NaiveDate, TimeZone};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pos_core::backend::subscribe::{watch_categories, watch_sales};
use pos_core::backend::traits::{CatalogSource, ConfirmationPrompt, SalesSink};
use pos_core::errors::CoreError;
use pos_core::models::cart::{Cart, CartLine};
use pos_core::models::category::{Category, CategoryUpdate};
use pos_core::models::item::{Item, ItemUpdate};
use pos_core::models::report::ReportFilter;
use pos_core::models::sale::Sale;
use pos_core::services::catalog_service::CatalogService;
use pos_core::services::checkout_service::CheckoutService;
use pos_core::services::report_service::ReportService;

// ═══════════════════════════════════════════════════════════════════
// Mock Backends
// ═══════════════════════════════════════════════════════════════════

#[derive(Default)]
struct MockCatalog {
    categories: Mutex<Vec<Category>>,
    items: Mutex<Vec<Item>>,
    fail_reads: AtomicBool,
}

impl MockCatalog {
    fn new() -> Self {
        Self::default()
    }

    fn with_categories(categories: Vec<Category>) -> Self {
        let mock = Self::new();
        *mock.categories.lock().unwrap() = categories;
        mock
    }

    fn push_category(&self, category: Category) {
        self.categories.lock().unwrap().push(category);
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    fn name(&self) -> &str {
        "MockCatalog"
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, CoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CoreError::BackendRead("simulated read failure".into()));
        }
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn fetch_items(&self) -> Result<Vec<Item>, CoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CoreError::BackendRead("simulated read failure".into()));
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn put_category(&self, category: &Category) -> Result<(), CoreError> {
        self.categories.lock().unwrap().push(category.clone());
        Ok(())
    }

    async fn update_category(&self, id: &str, update: &CategoryUpdate) -> Result<(), CoreError> {
        let mut categories = self.categories.lock().unwrap();
        let cat = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CategoryNotFound(id.to_string()))?;
        cat.name = update.name.clone();
        cat.icon = update.icon.clone();
        Ok(())
    }

    async fn delete_category(&self, id: &str) -> Result<(), CoreError> {
        self.categories.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn put_item(&self, item: &Item) -> Result<(), CoreError> {
        self.items.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn update_item(&self, id: &str, update: &ItemUpdate) -> Result<(), CoreError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;
        item.name = update.name.clone();
        item.price = update.price;
        item.description = update.description.clone();
        item.image = update.image.clone();
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), CoreError> {
        self.items.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct MockSalesSink {
    sales: Mutex<Vec<Sale>>,
    fail_append: AtomicBool,
    append_delay_ms: AtomicUsize,
}

impl MockSalesSink {
    fn new() -> Self {
        Self::default()
    }

    fn sale_count(&self) -> usize {
        self.sales.lock().unwrap().len()
    }
}

#[async_trait]
impl SalesSink for MockSalesSink {
    fn name(&self) -> &str {
        "MockSalesSink"
    }

    async fn append_sale(&self, sale: &Sale) -> Result<(), CoreError> {
        let delay = self.append_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(CoreError::BackendWrite("simulated write failure".into()));
        }
        self.sales.lock().unwrap().push(sale.clone());
        Ok(())
    }

    async fn fetch_sales(&self) -> Result<Vec<Sale>, CoreError> {
        Ok(self.sales.lock().unwrap().clone())
    }

    async fn clear_all_sales(&self) -> Result<(), CoreError> {
        self.sales.lock().unwrap().clear();
        Ok(())
    }
}

struct ScriptedPrompt {
    answer: bool,
    calls: AtomicUsize,
    last_title: Mutex<Option<String>>,
}

impl ScriptedPrompt {
    fn confirming() -> Self {
        Self {
            answer: true,
            calls: AtomicUsize::new(0),
            last_title: Mutex::new(None),
        }
    }

    fn cancelling() -> Self {
        Self {
            answer: false,
            calls: AtomicUsize::new(0),
            last_title: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ConfirmationPrompt for ScriptedPrompt {
    async fn confirm(&self, title: &str, _message: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_title.lock().unwrap() = Some(title.to_string());
        self.answer
    }
}

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn item(id: &str, name: &str, price: f64) -> Item {
    Item {
        id: id.to_string(),
        category_id: "cat-1".to_string(),
        name: name.to_string(),
        price,
        description: None,
        image: None,
    }
}

fn sale_on(y: i32, m: u32, day: u32, total: f64) -> Sale {
    let at = Local.with_ymd_and_hms(y, m, day, 12, 0, 0).unwrap();
    Sale::new(Vec::new(), total, at)
}

// ═══════════════════════════════════════════════════════════════════
// CatalogService
// ═══════════════════════════════════════════════════════════════════

mod catalog_service {
    use super::*;

    #[tokio::test]
    async fn add_category_writes_and_returns_record() {
        let source = MockCatalog::new();
        let service = CatalogService::new();

        let cat = service
            .add_category(&source, "Main Dishes", "hamburger", 1)
            .await
            .unwrap();

        assert_eq!(cat.name, "Main Dishes");
        assert_eq!(cat.icon, "hamburger");
        assert_eq!(cat.order, 1);
        assert_eq!(source.categories.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_category_trims_name() {
        let source = MockCatalog::new();
        let service = CatalogService::new();

        let cat = service
            .add_category(&source, "  Drinks  ", "beer", 2)
            .await
            .unwrap();
        assert_eq!(cat.name, "Drinks");
    }

    #[tokio::test]
    async fn add_category_rejects_blank_name() {
        let source = MockCatalog::new();
        let service = CatalogService::new();

        let err = service
            .add_category(&source, "   ", "beer", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(source.categories.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_category_rejects_missing_icon() {
        let source = MockCatalog::new();
        let service = CatalogService::new();

        let err = service
            .add_category(&source, "Drinks", "", 1)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Please select an icon");
    }

    #[tokio::test]
    async fn add_category_rejects_zero_order() {
        let source = MockCatalog::new();
        let service = CatalogService::new();

        let err = service
            .add_category(&source, "Drinks", "beer", 0)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn rename_category_patches_name_and_icon() {
        let cat = Category::new("Drinks", "beer", 1);
        let id = cat.id.clone();
        let source = MockCatalog::with_categories(vec![cat]);
        let service = CatalogService::new();

        service
            .rename_category(&source, &id, "Beverages", "coffee")
            .await
            .unwrap();

        let categories = source.categories.lock().unwrap();
        assert_eq!(categories[0].name, "Beverages");
        assert_eq!(categories[0].icon, "coffee");
        assert_eq!(categories[0].order, 1); // untouched
    }

    #[tokio::test]
    async fn delete_category_leaves_items_in_place() {
        let cat = Category::new("Drinks", "beer", 1);
        let id = cat.id.clone();
        let source = MockCatalog::with_categories(vec![cat]);
        source.items.lock().unwrap().push(item("i-1", "Cola", 15.0));
        let service = CatalogService::new();

        service.delete_category(&source, &id).await.unwrap();

        assert!(source.categories.lock().unwrap().is_empty());
        assert_eq!(source.items.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_item_writes_and_returns_record() {
        let source = MockCatalog::new();
        let service = CatalogService::new();

        let item = service
            .add_item(&source, "cat-1", "Burger", 50.0, None, None)
            .await
            .unwrap();

        assert_eq!(item.category_id, "cat-1");
        assert_eq!(item.price, 50.0);
        assert_eq!(source.items.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_item_rejects_blank_name() {
        let source = MockCatalog::new();
        let service = CatalogService::new();

        let err = service
            .add_item(&source, "cat-1", " ", 50.0, None, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Item name is required");
    }

    #[tokio::test]
    async fn add_item_rejects_non_positive_price() {
        let source = MockCatalog::new();
        let service = CatalogService::new();

        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = service
                .add_item(&source, "cat-1", "Burger", bad, None, None)
                .await
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
        assert!(source.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_item_normalizes_empty_optionals() {
        let source = MockCatalog::new();
        let service = CatalogService::new();

        let item = service
            .add_item(
                &source,
                "cat-1",
                "Burger",
                50.0,
                Some("   ".to_string()),
                Some(String::new()),
            )
            .await
            .unwrap();

        assert_eq!(item.description, None);
        assert_eq!(item.image, None);
    }

    #[tokio::test]
    async fn update_item_patches_fields_but_not_category() {
        let source = MockCatalog::new();
        source.items.lock().unwrap().push(item("i-1", "Burger", 50.0));
        let service = CatalogService::new();

        service
            .update_item(
                &source,
                "i-1",
                "Deluxe Burger",
                65.0,
                Some("Double beef".to_string()),
                None,
            )
            .await
            .unwrap();

        let items = source.items.lock().unwrap();
        assert_eq!(items[0].name, "Deluxe Burger");
        assert_eq!(items[0].price, 65.0);
        assert_eq!(items[0].description.as_deref(), Some("Double beef"));
        assert_eq!(items[0].category_id, "cat-1");
    }

    #[tokio::test]
    async fn delete_item_removes_it() {
        let source = MockCatalog::new();
        source.items.lock().unwrap().push(item("i-1", "Burger", 50.0));
        let service = CatalogService::new();

        service.delete_item(&source, "i-1").await.unwrap();
        assert!(source.items.lock().unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// CheckoutService
// ═══════════════════════════════════════════════════════════════════

mod checkout_service {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn empty_cart_fails_and_writes_nothing() {
        let sink = MockSalesSink::new();
        let service = CheckoutService::new();
        let mut cart = Cart::new();

        let err = service.checkout(&mut cart, &sink, TIMEOUT).await.unwrap_err();

        assert!(matches!(err, CoreError::EmptyCart));
        assert_eq!(err.to_string(), "No items selected");
        assert_eq!(sink.sale_count(), 0);
    }

    #[tokio::test]
    async fn success_commits_sale_and_clears_cart() {
        let sink = MockSalesSink::new();
        let service = CheckoutService::new();
        let mut cart = Cart::new();
        cart.add(&item("i-1", "Burger", 50.0));
        cart.add(&item("i-1", "Burger", 50.0));
        cart.add(&item("i-2", "Fries", 30.0));

        let sale = service.checkout(&mut cart, &sink, TIMEOUT).await.unwrap();

        assert_eq!(sale.total, 130.0);
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.items[0].qty, 2);
        assert_eq!(sale.items[1].qty, 1);
        assert!(cart.is_empty());
        assert_eq!(sink.sale_count(), 1);
        assert_eq!(sink.sales.lock().unwrap()[0], sale);
    }

    #[tokio::test]
    async fn write_failure_preserves_cart_exactly() {
        let sink = MockSalesSink::new();
        sink.fail_append.store(true, Ordering::SeqCst);
        let service = CheckoutService::new();
        let mut cart = Cart::new();
        cart.add(&item("i-1", "Burger", 50.0));
        cart.add(&item("i-2", "Fries", 30.0));
        let before = cart.clone();

        let err = service.checkout(&mut cart, &sink, TIMEOUT).await.unwrap_err();

        assert!(matches!(err, CoreError::BackendWrite(_)));
        assert_eq!(cart, before);
        assert_eq!(sink.sale_count(), 0);
    }

    #[tokio::test]
    async fn failed_checkout_can_be_retried_manually() {
        let sink = MockSalesSink::new();
        sink.fail_append.store(true, Ordering::SeqCst);
        let service = CheckoutService::new();
        let mut cart = Cart::new();
        cart.add(&item("i-1", "Burger", 50.0));

        assert!(service.checkout(&mut cart, &sink, TIMEOUT).await.is_err());

        sink.fail_append.store(false, Ordering::SeqCst);
        let sale = service.checkout(&mut cart, &sink, TIMEOUT).await.unwrap();
        assert_eq!(sale.total, 50.0);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn slow_sink_times_out_and_preserves_cart() {
        let sink = MockSalesSink::new();
        sink.append_delay_ms.store(5_000, Ordering::SeqCst);
        let service = CheckoutService::new();
        let mut cart = Cart::new();
        cart.add(&item("i-1", "Burger", 50.0));
        let before = cart.clone();

        let err = service
            .checkout(&mut cart, &sink, Duration::from_millis(20))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::CheckoutTimeout(_)));
        assert_eq!(cart, before);
    }

    #[tokio::test]
    async fn sale_snapshot_is_detached_from_cart() {
        let sink = MockSalesSink::new();
        let service = CheckoutService::new();
        let mut cart = Cart::new();
        cart.add(&item("i-1", "Burger", 50.0));

        let sale = service.checkout(&mut cart, &sink, TIMEOUT).await.unwrap();

        // New session in the same cart: the committed sale must not move.
        cart.add(&item("i-2", "Fries", 30.0));
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sink.sales.lock().unwrap()[0].items.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ReportService
// ═══════════════════════════════════════════════════════════════════

mod report_service {
    use super::*;

    #[test]
    fn filter_all_keeps_input_order() {
        let service = ReportService::new();
        let sales = vec![
            sale_on(2026, 8, 6, 30.0),
            sale_on(2026, 8, 5, 20.0),
            sale_on(2026, 7, 1, 10.0),
        ];

        let filtered = service.filter(&sales, &ReportFilter::All, d(2026, 8, 6));
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].total, 30.0);
        assert_eq!(filtered[2].total, 10.0);
    }

    #[test]
    fn filter_today_uses_calendar_date() {
        let service = ReportService::new();
        let sales = vec![sale_on(2026, 8, 6, 30.0), sale_on(2026, 8, 5, 20.0)];

        let filtered = service.filter(&sales, &ReportFilter::Today, d(2026, 8, 6));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].total, 30.0);
    }

    #[test]
    fn filter_by_date_picks_one_day() {
        let service = ReportService::new();
        let sales = vec![
            sale_on(2026, 8, 6, 30.0),
            sale_on(2026, 8, 5, 20.0),
            sale_on(2026, 8, 5, 25.0),
        ];

        let filtered = service.filter(
            &sales,
            &ReportFilter::ByDate(d(2026, 8, 5)),
            d(2026, 8, 6),
        );
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn summarize_counts_and_sums_stored_totals() {
        let service = ReportService::new();
        let sales = vec![sale_on(2026, 8, 6, 130.0), sale_on(2026, 8, 6, 70.0)];

        let filtered = service.filter(&sales, &ReportFilter::All, d(2026, 8, 6));
        let summary = service.summarize(&filtered);

        assert_eq!(summary.orders, 2);
        assert_eq!(summary.total_revenue, 200.0);
    }

    #[test]
    fn summarize_uses_precomputed_total_not_lines() {
        let service = ReportService::new();
        // A sale whose stored total disagrees with its lines: the report
        // must trust the stored total.
        let at = Local.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let lines = vec![CartLine {
            item_id: "i-1".to_string(),
            name: "Burger".to_string(),
            price: 50.0,
            qty: 1,
        }];
        let sale = Sale::new(lines, 999.0, at);

        let summary = service.summarize(&[&sale]);
        assert_eq!(summary.total_revenue, 999.0);
    }

    #[test]
    fn summarize_empty_set() {
        let service = ReportService::new();
        let summary = service.summarize(&[]);
        assert_eq!(summary.orders, 0);
        assert_eq!(summary.total_revenue, 0.0);
    }

    #[tokio::test]
    async fn clear_all_confirmed_deletes_everything() {
        let sink = MockSalesSink::new();
        sink.sales.lock().unwrap().push(sale_on(2026, 8, 6, 130.0));
        let service = ReportService::new();
        let prompt = ScriptedPrompt::confirming();

        let cleared = service.clear_all(&sink, &prompt).await.unwrap();

        assert!(cleared);
        assert_eq!(sink.sale_count(), 0);
        assert_eq!(prompt.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            prompt.last_title.lock().unwrap().as_deref(),
            Some("Clear All Bills")
        );
    }

    #[tokio::test]
    async fn clear_all_cancelled_deletes_nothing() {
        let sink = MockSalesSink::new();
        sink.sales.lock().unwrap().push(sale_on(2026, 8, 6, 130.0));
        let service = ReportService::new();
        let prompt = ScriptedPrompt::cancelling();

        let cleared = service.clear_all(&sink, &prompt).await.unwrap();

        assert!(!cleared);
        assert_eq!(sink.sale_count(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Watch subscriptions
// ═══════════════════════════════════════════════════════════════════

mod subscriptions {
    use super::*;

    #[tokio::test]
    async fn watch_categories_delivers_snapshots() {
        let source = Arc::new(MockCatalog::with_categories(vec![Category::new(
            "Drinks", "beer", 1,
        )]));
        let mut rx = watch_categories(source.clone(), Duration::from_millis(10));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);

        source.push_category(Category::new("Main Dishes", "hamburger", 2));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 2);
    }

    #[tokio::test]
    async fn watch_keeps_last_snapshot_across_failed_polls() {
        let source = Arc::new(MockCatalog::with_categories(vec![Category::new(
            "Drinks", "beer", 1,
        )]));
        let mut rx = watch_categories(source.clone(), Duration::from_millis(10));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);

        // Several failing polls must not clobber the snapshot.
        source.fail_reads.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(rx.borrow().len(), 1);

        // Recovery resumes deliveries.
        source.fail_reads.store(false, Ordering::SeqCst);
        source.push_category(Category::new("Main Dishes", "hamburger", 2));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 2);
    }

    #[tokio::test]
    async fn watch_sales_delivers_snapshots() {
        let sink = Arc::new(MockSalesSink::new());
        sink.sales.lock().unwrap().push(sale_on(2026, 8, 6, 130.0));
        let mut rx = watch_sales(sink.clone(), Duration::from_millis(10));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }
}
