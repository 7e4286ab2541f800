//! Sweet Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use domain_notifications::NotificationService;

use crate::error::{SweetError, SweetResult};
use crate::models::{CreateSweet, PurchaseLine, PurchaseLineResult, SortField, SortOrder, Sweet};
use crate::repository::SweetRepository;

/// Maximum number of records a search returns.
pub const SEARCH_RESULT_LIMIT: i64 = 15;

/// Sweet service providing business logic operations
///
/// The service layer handles validation, the stock invariants, the search
/// fallback policy, and orchestrates repository operations.
pub struct SweetService<R: SweetRepository> {
    repository: Arc<R>,
    notifications: Option<NotificationService>,
}

impl<R: SweetRepository> SweetService<R> {
    /// Create a new SweetService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            notifications: None,
        }
    }

    /// Attach the notification service used for admin emails on creation.
    pub fn with_notifications(mut self, notifications: NotificationService) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Create a new sweet
    ///
    /// Rejects duplicate names, then queues the admin notification. A
    /// notification failure is logged and never fails the create.
    #[instrument(skip(self, input), fields(sweet_name = %input.name))]
    pub async fn create_sweet(&self, input: CreateSweet) -> SweetResult<Sweet> {
        // Validate input
        input
            .validate()
            .map_err(|e| SweetError::Validation(e.to_string()))?;

        // Check for duplicate name
        if self.repository.exists_by_name(&input.name).await? {
            return Err(SweetError::DuplicateName(input.name));
        }

        let sweet = self.repository.create(input).await?;

        if let Some(ref notifications) = self.notifications {
            if let Err(e) =
                notifications.queue_sweet_added(&sweet.name, &sweet.category.to_string())
            {
                tracing::warn!(sweet_id = %sweet.id, error = %e, "Failed to queue admin notification");
            }
        }

        Ok(sweet)
    }

    /// Get a sweet by ID
    #[instrument(skip(self))]
    pub async fn get_sweet(&self, id: Uuid) -> SweetResult<Sweet> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(SweetError::NotFound(id))
    }

    /// List all sweets
    #[instrument(skip(self))]
    pub async fn list_sweets(&self) -> SweetResult<Vec<Sweet>> {
        self.repository.list().await
    }

    /// Delete a sweet
    #[instrument(skip(self))]
    pub async fn delete_sweet(&self, id: Uuid) -> SweetResult<()> {
        if !self.repository.delete(id).await? {
            return Err(SweetError::NotFound(id));
        }
        Ok(())
    }

    /// Search sweets by text or price
    ///
    /// Matches case-insensitively against name, category and description,
    /// with an exact price clause when the query is numeric. When nothing
    /// matches a numeric query, the result falls back to sweets priced
    /// strictly above the queried value, with the same sort and cap.
    #[instrument(skip(self))]
    pub async fn search_sweets(
        &self,
        query: &str,
        sort_by: Option<&str>,
        order: &str,
    ) -> SweetResult<Vec<Sweet>> {
        let sort = sort_by
            .and_then(SortField::parse)
            .map(|field| (field, SortOrder::parse(order)));
        let price = query.trim().parse::<f64>().ok();

        let sweets = self
            .repository
            .search(query, price, sort, SEARCH_RESULT_LIMIT)
            .await?;

        if sweets.is_empty() {
            if let Some(price) = price {
                return self
                    .repository
                    .find_price_above(price, sort, SEARCH_RESULT_LIMIT)
                    .await;
            }
        }

        Ok(sweets)
    }

    /// Purchase a quantity of one sweet, returning the remaining stock
    #[instrument(skip(self))]
    pub async fn purchase_sweet(&self, id: Uuid, quantity: i32) -> SweetResult<i32> {
        if quantity <= 0 {
            return Err(SweetError::InvalidQuantity);
        }

        match self.repository.decrement_quantity(id, quantity).await? {
            Some(sweet) => Ok(sweet.quantity),
            None => {
                // The conditional update missed: either the sweet does not
                // exist or it has fewer units than requested.
                match self.repository.get_by_id(id).await? {
                    Some(sweet) => Err(SweetError::InsufficientStock {
                        available: sweet.quantity,
                        requested: quantity,
                    }),
                    None => Err(SweetError::NotFound(id)),
                }
            }
        }
    }

    /// Purchase a batch of line items
    ///
    /// Lines are applied sequentially and independently; the first failing
    /// line aborts the batch with its error, and decrements already applied
    /// to earlier lines stand.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn purchase_sweets(
        &self,
        lines: &[PurchaseLine],
    ) -> SweetResult<Vec<PurchaseLineResult>> {
        let mut results = Vec::with_capacity(lines.len());

        for line in lines {
            let remaining = self.purchase_sweet(line.sweet_id, line.quantity).await?;
            results.push(PurchaseLineResult {
                sweet_id: line.sweet_id,
                status: true,
                message: "Purchase successful".to_string(),
                remaining_quantity: remaining,
            });
        }

        Ok(results)
    }

    /// Restock a sweet, returning the updated stock
    #[instrument(skip(self))]
    pub async fn restock_sweet(&self, id: Uuid, quantity: i32) -> SweetResult<i32> {
        if quantity <= 0 {
            return Err(SweetError::InvalidQuantity);
        }

        self.repository
            .increment_quantity(id, quantity)
            .await?
            .map(|sweet| sweet.quantity)
            .ok_or(SweetError::NotFound(id))
    }
}

impl<R: SweetRepository> Clone for SweetService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            notifications: self.notifications.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SweetCategory;
    use crate::repository::MockSweetRepository;
    use mockall::predicate::eq;

    fn kaju_katli_input() -> CreateSweet {
        CreateSweet {
            name: "Kaju Katli".to_string(),
            category: SweetCategory::NutBased,
            price: 100.0,
            quantity: 10,
            discount: 20.0,
            description: None,
            image_url: None,
        }
    }

    fn sweet_with_quantity(quantity: i32) -> Sweet {
        let mut input = kaju_katli_input();
        input.quantity = quantity;
        Sweet::new(input)
    }

    #[tokio::test]
    async fn test_create_sweet_success() {
        let mut repo = MockSweetRepository::new();
        repo.expect_exists_by_name()
            .with(eq("Kaju Katli"))
            .return_once(|_| Ok(false));
        repo.expect_create()
            .return_once(|input| Ok(Sweet::new(input)));

        let service = SweetService::new(repo);
        let sweet = service.create_sweet(kaju_katli_input()).await.unwrap();

        assert_eq!(sweet.name, "Kaju Katli");
        assert_eq!(sweet.final_price(), 80.0);
        assert!(sweet.is_available());
    }

    #[tokio::test]
    async fn test_create_sweet_duplicate_name() {
        let mut repo = MockSweetRepository::new();
        repo.expect_exists_by_name().return_once(|_| Ok(true));

        let service = SweetService::new(repo);
        let err = service.create_sweet(kaju_katli_input()).await.unwrap_err();

        assert!(matches!(err, SweetError::DuplicateName(name) if name == "Kaju Katli"));
    }

    #[tokio::test]
    async fn test_create_sweet_invalid_input_skips_repository() {
        // No expectations set: any repository call would panic.
        let repo = MockSweetRepository::new();
        let service = SweetService::new(repo);

        let mut input = kaju_katli_input();
        input.price = 0.0;

        let err = service.create_sweet(input).await.unwrap_err();
        assert!(matches!(err, SweetError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_sweet_queues_notification() {
        use domain_notifications::{NotificationConfig, NotificationService};

        let mut repo = MockSweetRepository::new();
        repo.expect_exists_by_name().return_once(|_| Ok(false));
        repo.expect_create()
            .return_once(|input| Ok(Sweet::new(input)));

        let (notifications, mut rx) = NotificationService::new(NotificationConfig {
            admin_email: "admin@example.com".to_string(),
        });
        let service = SweetService::new(repo).with_notifications(notifications);

        service.create_sweet(kaju_katli_input()).await.unwrap();

        let job = rx.recv().await.unwrap();
        assert!(job.body.contains("Kaju Katli"));
        assert!(job.body.contains("Nut-based"));
    }

    #[tokio::test]
    async fn test_create_sweet_survives_closed_notification_queue() {
        use domain_notifications::{NotificationConfig, NotificationService};

        let mut repo = MockSweetRepository::new();
        repo.expect_exists_by_name().return_once(|_| Ok(false));
        repo.expect_create()
            .return_once(|input| Ok(Sweet::new(input)));

        let (notifications, rx) = NotificationService::new(NotificationConfig {
            admin_email: "admin@example.com".to_string(),
        });
        drop(rx);
        let service = SweetService::new(repo).with_notifications(notifications);

        // Enqueue fails because the worker is gone; the create still succeeds.
        assert!(service.create_sweet(kaju_katli_input()).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_sweet_not_found() {
        let mut repo = MockSweetRepository::new();
        repo.expect_get_by_id().return_once(|_| Ok(None));

        let service = SweetService::new(repo);
        let id = Uuid::new_v4();
        let err = service.get_sweet(id).await.unwrap_err();

        assert!(matches!(err, SweetError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_delete_sweet_not_found() {
        let mut repo = MockSweetRepository::new();
        repo.expect_delete().return_once(|_| Ok(false));

        let service = SweetService::new(repo);
        let err = service.delete_sweet(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, SweetError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_purchase_decrements_stock() {
        let id = Uuid::new_v4();
        let mut repo = MockSweetRepository::new();
        repo.expect_decrement_quantity()
            .with(eq(id), eq(5))
            .return_once(|_, _| Ok(Some(sweet_with_quantity(5))));

        let service = SweetService::new(repo);
        let remaining = service.purchase_sweet(id, 5).await.unwrap();

        assert_eq!(remaining, 5);
    }

    #[tokio::test]
    async fn test_purchase_insufficient_stock() {
        let id = Uuid::new_v4();
        let mut repo = MockSweetRepository::new();
        repo.expect_decrement_quantity().return_once(|_, _| Ok(None));
        repo.expect_get_by_id()
            .with(eq(id))
            .return_once(|_| Ok(Some(sweet_with_quantity(3))));

        let service = SweetService::new(repo);
        let err = service.purchase_sweet(id, 5).await.unwrap_err();

        assert!(matches!(
            err,
            SweetError::InsufficientStock {
                available: 3,
                requested: 5
            }
        ));
    }

    #[tokio::test]
    async fn test_purchase_missing_sweet() {
        let mut repo = MockSweetRepository::new();
        repo.expect_decrement_quantity().return_once(|_, _| Ok(None));
        repo.expect_get_by_id().return_once(|_| Ok(None));

        let service = SweetService::new(repo);
        let err = service.purchase_sweet(Uuid::new_v4(), 5).await.unwrap_err();

        assert!(matches!(err, SweetError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_purchase_rejects_non_positive_quantity() {
        // No expectations: the repository must not be touched.
        let service = SweetService::new(MockSweetRepository::new());
        let id = Uuid::new_v4();

        assert!(matches!(
            service.purchase_sweet(id, 0).await.unwrap_err(),
            SweetError::InvalidQuantity
        ));
        assert!(matches!(
            service.purchase_sweet(id, -1).await.unwrap_err(),
            SweetError::InvalidQuantity
        ));
    }

    #[tokio::test]
    async fn test_batch_purchase_all_lines_succeed() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let mut repo = MockSweetRepository::new();
        repo.expect_decrement_quantity()
            .with(eq(first), eq(2))
            .return_once(|_, _| Ok(Some(sweet_with_quantity(8))));
        repo.expect_decrement_quantity()
            .with(eq(second), eq(1))
            .return_once(|_, _| Ok(Some(sweet_with_quantity(4))));

        let service = SweetService::new(repo);
        let lines = vec![
            PurchaseLine {
                sweet_id: first,
                quantity: 2,
            },
            PurchaseLine {
                sweet_id: second,
                quantity: 1,
            },
        ];

        let results = service.purchase_sweets(&lines).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].remaining_quantity, 8);
        assert_eq!(results[1].remaining_quantity, 4);
        assert!(results.iter().all(|r| r.status));
    }

    #[tokio::test]
    async fn test_batch_purchase_short_circuits_without_rollback() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let mut repo = MockSweetRepository::new();
        // First line applies; second misses on stock. No compensating call
        // against the first line is expected.
        repo.expect_decrement_quantity()
            .with(eq(first), eq(2))
            .times(1)
            .return_once(|_, _| Ok(Some(sweet_with_quantity(8))));
        repo.expect_decrement_quantity()
            .with(eq(second), eq(9))
            .times(1)
            .return_once(|_, _| Ok(None));
        repo.expect_get_by_id()
            .with(eq(second))
            .return_once(|_| Ok(Some(sweet_with_quantity(1))));

        let service = SweetService::new(repo);
        let lines = vec![
            PurchaseLine {
                sweet_id: first,
                quantity: 2,
            },
            PurchaseLine {
                sweet_id: second,
                quantity: 9,
            },
        ];

        let err = service.purchase_sweets(&lines).await.unwrap_err();
        assert!(matches!(err, SweetError::InsufficientStock { .. }));
    }

    #[tokio::test]
    async fn test_restock_increments_stock() {
        let id = Uuid::new_v4();
        let mut repo = MockSweetRepository::new();
        repo.expect_increment_quantity()
            .with(eq(id), eq(40))
            .return_once(|_, _| Ok(Some(sweet_with_quantity(45))));

        let service = SweetService::new(repo);
        let updated = service.restock_sweet(id, 40).await.unwrap();

        assert_eq!(updated, 45);
    }

    #[tokio::test]
    async fn test_restock_missing_sweet() {
        let mut repo = MockSweetRepository::new();
        repo.expect_increment_quantity().return_once(|_, _| Ok(None));

        let service = SweetService::new(repo);
        let err = service.restock_sweet(Uuid::new_v4(), 10).await.unwrap_err();

        assert!(matches!(err, SweetError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_restock_rejects_non_positive_quantity() {
        let service = SweetService::new(MockSweetRepository::new());

        assert!(matches!(
            service.restock_sweet(Uuid::new_v4(), 0).await.unwrap_err(),
            SweetError::InvalidQuantity
        ));
    }

    #[tokio::test]
    async fn test_search_passes_sort_and_numeric_price() {
        let mut repo = MockSweetRepository::new();
        repo.expect_search()
            .withf(|query, price, sort, limit| {
                query == "150"
                    && *price == Some(150.0)
                    && *sort == Some((SortField::Price, SortOrder::Descending))
                    && *limit == SEARCH_RESULT_LIMIT
            })
            .return_once(|_, _, _, _| Ok(vec![sweet_with_quantity(5)]));

        let service = SweetService::new(repo);
        let sweets = service
            .search_sweets("150", Some("price"), "desc")
            .await
            .unwrap();

        assert_eq!(sweets.len(), 1);
    }

    #[tokio::test]
    async fn test_search_ignores_unknown_sort_field() {
        let mut repo = MockSweetRepository::new();
        repo.expect_search()
            .withf(|query, price, sort, _| {
                query == "choco" && price.is_none() && sort.is_none()
            })
            .return_once(|_, _, _, _| Ok(vec![sweet_with_quantity(5)]));

        let service = SweetService::new(repo);
        let sweets = service
            .search_sweets("choco", Some("quantity"), "asc")
            .await
            .unwrap();

        assert_eq!(sweets.len(), 1);
    }

    #[tokio::test]
    async fn test_search_numeric_fallback_to_price_above() {
        let mut repo = MockSweetRepository::new();
        repo.expect_search().return_once(|_, _, _, _| Ok(vec![]));
        repo.expect_find_price_above()
            .withf(|price, sort, limit| {
                *price == 150.0 && sort.is_none() && *limit == SEARCH_RESULT_LIMIT
            })
            .return_once(|_, _, _| Ok(vec![sweet_with_quantity(2)]));

        let service = SweetService::new(repo);
        let sweets = service.search_sweets("150", None, "asc").await.unwrap();

        assert_eq!(sweets.len(), 1);
    }

    #[tokio::test]
    async fn test_search_no_fallback_for_text_query() {
        // find_price_above has no expectation: calling it would panic.
        let mut repo = MockSweetRepository::new();
        repo.expect_search().return_once(|_, _, _, _| Ok(vec![]));

        let service = SweetService::new(repo);
        let sweets = service.search_sweets("nougat", None, "asc").await.unwrap();

        assert!(sweets.is_empty());
    }
}
