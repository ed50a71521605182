use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::traits::{CatalogSource, SalesSink};
use crate::errors::CoreError;
use crate::models::category::{Category, CategoryUpdate};
use crate::models::item::{Item, ItemUpdate};
use crate::models::sale::Sale;

/// Connection settings for the hosted realtime database.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Database root, e.g. `https://my-pos-default-rtdb.firebaseio.com`.
    pub database_url: String,

    /// Optional `auth` query token. Kept out of error messages.
    pub auth_token: Option<String>,

    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl FirebaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            auth_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// REST client for a Firebase Realtime Database.
///
/// One explicitly constructed handle implements both backend seams
/// ([`CatalogSource`] and [`SalesSink`]); construct it at startup and
/// pass it to whoever needs it — there is no shared global.
///
/// The database stores each collection as a node of `{key: record}`
/// children; an absent node reads as JSON `null`, which decodes to an
/// empty list here.
pub struct FirebaseClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl std::fmt::Debug for FirebaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.auth_token.is_some())
            .finish()
    }
}

impl FirebaseClient {
    pub fn new(config: FirebaseConfig) -> Self {
        let builder = Client::builder().timeout(config.request_timeout);
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: config.database_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token,
        }
    }

    fn url(&self, path: &str) -> String {
        match &self.auth_token {
            Some(token) => format!("{}/{path}.json?auth={token}", self.base_url),
            None => format!("{}/{path}.json", self.base_url),
        }
    }

    /// GET a whole collection node. `null` (absent node) is an empty list.
    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, CoreError> {
        let resp = self.client.get(self.url(path)).send().await?;
        if !resp.status().is_success() {
            return Err(CoreError::BackendRead(format!(
                "{path}: HTTP {}",
                resp.status()
            )));
        }
        let entries: Option<HashMap<String, T>> =
            resp.json().await.map_err(|e| CoreError::Api {
                path: path.to_string(),
                message: format!("failed to parse response: {e}"),
            })?;
        Ok(entries.map(|m| m.into_values().collect()).unwrap_or_default())
    }

    async fn put<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), CoreError> {
        let resp = self.client.put(self.url(path)).json(body).send().await?;
        Self::check_write(path, &resp)
    }

    async fn patch<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), CoreError> {
        let resp = self.client.patch(self.url(path)).json(body).send().await?;
        Self::check_write(path, &resp)
    }

    /// POST is the database's push: the server assigns a child key.
    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), CoreError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Self::check_write(path, &resp)
    }

    async fn delete(&self, path: &str) -> Result<(), CoreError> {
        let resp = self.client.delete(self.url(path)).send().await?;
        Self::check_write(path, &resp)
    }

    fn check_write(path: &str, resp: &Response) -> Result<(), CoreError> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(CoreError::BackendWrite(format!(
                "{path}: HTTP {}",
                resp.status()
            )))
        }
    }
}

#[async_trait]
impl CatalogSource for FirebaseClient {
    fn name(&self) -> &str {
        "Firebase Realtime Database"
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, CoreError> {
        self.get_collection("categories").await
    }

    async fn fetch_items(&self) -> Result<Vec<Item>, CoreError> {
        self.get_collection("items").await
    }

    async fn put_category(&self, category: &Category) -> Result<(), CoreError> {
        debug!(id = %category.id, "writing category");
        self.put(&format!("categories/{}", category.id), category)
            .await
    }

    async fn update_category(&self, id: &str, update: &CategoryUpdate) -> Result<(), CoreError> {
        debug!(id, "updating category");
        self.patch(&format!("categories/{id}"), update).await
    }

    async fn delete_category(&self, id: &str) -> Result<(), CoreError> {
        debug!(id, "deleting category");
        self.delete(&format!("categories/{id}")).await
    }

    async fn put_item(&self, item: &Item) -> Result<(), CoreError> {
        debug!(id = %item.id, "writing item");
        self.put(&format!("items/{}", item.id), item).await
    }

    async fn update_item(&self, id: &str, update: &ItemUpdate) -> Result<(), CoreError> {
        debug!(id, "updating item");
        self.patch(&format!("items/{id}"), update).await
    }

    async fn delete_item(&self, id: &str) -> Result<(), CoreError> {
        debug!(id, "deleting item");
        self.delete(&format!("items/{id}")).await
    }
}

#[async_trait]
impl SalesSink for FirebaseClient {
    fn name(&self) -> &str {
        "Firebase Realtime Database"
    }

    async fn append_sale(&self, sale: &Sale) -> Result<(), CoreError> {
        debug!(id = %sale.id, total = sale.total, "appending sale");
        self.post("sales", sale).await
    }

    async fn fetch_sales(&self) -> Result<Vec<Sale>, CoreError> {
        self.get_collection("sales").await
    }

    async fn clear_all_sales(&self) -> Result<(), CoreError> {
        debug!("clearing all sales");
        self.delete("sales").await
    }
}
