use crate::backend::traits::CatalogSource;
use crate::errors::CoreError;
use crate::models::category::{Category, CategoryUpdate};
use crate::models::item::{Item, ItemUpdate};

/// Manages the menu: category and item create/update/delete.
///
/// Validates user input the way the entry forms do, then delegates
/// persistence to the [`CatalogSource`]. Holds no state of its own —
/// the current catalog lives in the read-only view and is refreshed by
/// the backend push, not by these calls.
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    /// Create a new category and write it to the backend.
    /// Returns the stored record (with its generated id).
    pub async fn add_category(
        &self,
        source: &dyn CatalogSource,
        name: &str,
        icon: &str,
        order: u32,
    ) -> Result<Category, CoreError> {
        let name = Self::required(name, "Category name is required")?;
        Self::required_icon(icon)?;
        Self::valid_order(order)?;

        let category = Category::new(name, icon, order);
        source.put_category(&category).await?;
        Ok(category)
    }

    /// Rename a category and/or change its icon. Sort order is fixed at
    /// creation and not editable here.
    pub async fn rename_category(
        &self,
        source: &dyn CatalogSource,
        id: &str,
        name: &str,
        icon: &str,
    ) -> Result<(), CoreError> {
        let name = Self::required(name, "Category name is required")?;
        Self::required_icon(icon)?;

        let update = CategoryUpdate {
            name,
            icon: icon.to_string(),
        };
        source.update_category(id, &update).await
    }

    /// Delete a category. Items that referenced it stay in the backend
    /// but no longer appear on the selling screen.
    pub async fn delete_category(
        &self,
        source: &dyn CatalogSource,
        id: &str,
    ) -> Result<(), CoreError> {
        source.delete_category(id).await
    }

    /// Create a new item inside a category and write it to the backend.
    pub async fn add_item(
        &self,
        source: &dyn CatalogSource,
        category_id: &str,
        name: &str,
        price: f64,
        description: Option<String>,
        image: Option<String>,
    ) -> Result<Item, CoreError> {
        let name = Self::required(name, "Item name is required")?;
        Self::valid_price(price)?;

        let item = Item::new(
            category_id,
            name,
            price,
            Self::normalize(description),
            Self::normalize(image),
        );
        source.put_item(&item).await?;
        Ok(item)
    }

    /// Edit an existing item's name, price, description or image.
    /// The owning category never changes.
    pub async fn update_item(
        &self,
        source: &dyn CatalogSource,
        id: &str,
        name: &str,
        price: f64,
        description: Option<String>,
        image: Option<String>,
    ) -> Result<(), CoreError> {
        let name = Self::required(name, "Item name is required")?;
        Self::valid_price(price)?;

        let update = ItemUpdate {
            name,
            price,
            description: Self::normalize(description),
            image: Self::normalize(image),
        };
        source.update_item(id, &update).await
    }

    /// Delete an item.
    pub async fn delete_item(&self, source: &dyn CatalogSource, id: &str) -> Result<(), CoreError> {
        source.delete_item(id).await
    }

    // ── Validation ──────────────────────────────────────────────────

    fn required(value: &str, message: &str) -> Result<String, CoreError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(message.to_string()));
        }
        Ok(trimmed.to_string())
    }

    fn required_icon(icon: &str) -> Result<(), CoreError> {
        if icon.trim().is_empty() {
            return Err(CoreError::Validation("Please select an icon".into()));
        }
        Ok(())
    }

    fn valid_order(order: u32) -> Result<(), CoreError> {
        if order == 0 {
            return Err(CoreError::Validation(
                "Sort order must be a number greater than 0".into(),
            ));
        }
        Ok(())
    }

    fn valid_price(price: f64) -> Result<(), CoreError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(CoreError::Validation(
                "Price must be a number greater than 0".into(),
            ));
        }
        Ok(())
    }

    fn normalize(field: Option<String>) -> Option<String> {
        field
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}
