use async_trait::async_trait;
use uuid::Uuid;

use crate::error::SweetResult;
use crate::models::{CreateSweet, SortField, SortOrder, Sweet};

/// Repository trait for Sweet persistence
///
/// This trait defines the data access interface for the inventory.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SweetRepository: Send + Sync {
    /// Create a new sweet
    async fn create(&self, input: CreateSweet) -> SweetResult<Sweet>;

    /// Get a sweet by ID
    async fn get_by_id(&self, id: Uuid) -> SweetResult<Option<Sweet>>;

    /// List all sweets, store order
    async fn list(&self) -> SweetResult<Vec<Sweet>>;

    /// Delete a sweet by ID, returning whether a document was removed
    async fn delete(&self, id: Uuid) -> SweetResult<bool>;

    /// Check if a sweet name exists (case-sensitive exact match)
    async fn exists_by_name(&self, name: &str) -> SweetResult<bool>;

    /// Search by case-insensitive pattern on name, category and description;
    /// `price` adds an exact price-match clause when the query is numeric
    async fn search(
        &self,
        query: &str,
        price: Option<f64>,
        sort: Option<(SortField, SortOrder)>,
        limit: i64,
    ) -> SweetResult<Vec<Sweet>>;

    /// Find sweets priced strictly above the given value
    async fn find_price_above(
        &self,
        price: f64,
        sort: Option<(SortField, SortOrder)>,
        limit: i64,
    ) -> SweetResult<Vec<Sweet>>;

    /// Atomically decrement stock if at least `quantity` units are available.
    ///
    /// Returns the updated sweet, or `None` when no document matched (the
    /// sweet is absent or its stock is below `quantity`).
    async fn decrement_quantity(&self, id: Uuid, quantity: i32) -> SweetResult<Option<Sweet>>;

    /// Atomically increment stock, returning the updated sweet or `None`
    /// when the sweet is absent.
    async fn increment_quantity(&self, id: Uuid, quantity: i32) -> SweetResult<Option<Sweet>>;
}
