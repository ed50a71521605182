//! Polling subscriptions over the backend seams.
//!
//! The backend contract is snapshot-based: every push is a full
//! replacement of a collection, never a delta. These watchers poll on
//! an interval and publish each changed snapshot into a
//! [`tokio::sync::watch`] channel; the embedding UI hands the received
//! lists to the façade's `apply_*` methods.
//!
//! A failed poll keeps the last good snapshot (the channel starts from
//! the empty list, so a backend that never answers presents as empty
//! data). The loop ends when the last receiver is dropped.
//!
//! Callers must be inside a tokio runtime; each watcher spawns one task.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::warn;

use super::traits::{CatalogSource, SalesSink};
use crate::errors::CoreError;
use crate::models::category::Category;
use crate::models::item::Item;
use crate::models::sale::Sale;

/// Watch the category collection, polling every `every`.
pub fn watch_categories(
    source: Arc<dyn CatalogSource>,
    every: Duration,
) -> watch::Receiver<Vec<Category>> {
    spawn_watcher("categories", every, move || {
        let source = Arc::clone(&source);
        async move { source.fetch_categories().await }
    })
}

/// Watch the item collection, polling every `every`.
pub fn watch_items(source: Arc<dyn CatalogSource>, every: Duration) -> watch::Receiver<Vec<Item>> {
    spawn_watcher("items", every, move || {
        let source = Arc::clone(&source);
        async move { source.fetch_items().await }
    })
}

/// Watch the sales collection, polling every `every`.
pub fn watch_sales(sink: Arc<dyn SalesSink>, every: Duration) -> watch::Receiver<Vec<Sale>> {
    spawn_watcher("sales", every, move || {
        let sink = Arc::clone(&sink);
        async move { sink.fetch_sales().await }
    })
}

fn spawn_watcher<T, F, Fut>(collection: &'static str, every: Duration, fetch: F) -> watch::Receiver<Vec<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Vec<T>, CoreError>> + Send + 'static,
{
    let (tx, rx) = watch::channel(Vec::new());
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }
            match fetch().await {
                Ok(snapshot) => {
                    let changed = *tx.borrow() != snapshot;
                    if changed && tx.send(snapshot).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(collection, error = %e, "poll failed; keeping last snapshot");
                }
            }
        }
    });
    rx
}
