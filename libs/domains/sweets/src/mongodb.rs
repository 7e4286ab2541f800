//! MongoDB implementation of SweetRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::SweetResult;
use crate::models::{CreateSweet, SortField, SortOrder, Sweet};
use crate::repository::SweetRepository;

/// MongoDB implementation of the SweetRepository
pub struct MongoSweetRepository {
    collection: Collection<Sweet>,
}

impl MongoSweetRepository {
    /// Create a new MongoSweetRepository
    ///
    /// # Arguments
    /// * `db` - MongoDB database instance
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("sweetshop");
    /// let repo = MongoSweetRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Sweet>("sweets");
        Self { collection }
    }

    /// Create a new MongoSweetRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Sweet>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Sweet> {
        &self.collection
    }

    /// Create the indexes this repository relies on.
    ///
    /// The unique index on `name` backs the duplicate-name check at creation
    /// time; collisions that slip past the existence check fail on insert.
    pub async fn ensure_indexes(&self) -> SweetResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_unique_name".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(name_index).await?;

        tracing::info!("Sweet collection indexes ensured");
        Ok(())
    }

    /// Build the disjunctive search filter: case-insensitive pattern match
    /// on name, category and description, plus an exact price clause when
    /// the query text parsed as a number.
    fn build_search_filter(query: &str, price: Option<f64>) -> Document {
        let mut clauses = vec![
            doc! { "name": { "$regex": query, "$options": "i" } },
            doc! { "category": { "$regex": query, "$options": "i" } },
            doc! { "description": { "$regex": query, "$options": "i" } },
        ];

        if let Some(price) = price {
            clauses.push(doc! { "price": price });
        }

        doc! { "$or": clauses }
    }

    fn sort_doc(sort: Option<(SortField, SortOrder)>) -> Option<Document> {
        sort.map(|(field, order)| {
            let direction = match order {
                SortOrder::Ascending => 1,
                SortOrder::Descending => -1,
            };
            doc! { field.as_str(): direction }
        })
    }

    async fn find_sorted(
        &self,
        filter: Document,
        sort: Option<(SortField, SortOrder)>,
        limit: i64,
    ) -> SweetResult<Vec<Sweet>> {
        use futures_util::TryStreamExt;

        let mut options = FindOptions::builder().limit(limit).build();
        options.sort = Self::sort_doc(sort);

        let cursor = self.collection.find(filter).with_options(options).await?;
        let sweets: Vec<Sweet> = cursor.try_collect().await?;

        Ok(sweets)
    }
}

#[async_trait]
impl SweetRepository for MongoSweetRepository {
    #[instrument(skip(self, input), fields(sweet_name = %input.name))]
    async fn create(&self, input: CreateSweet) -> SweetResult<Sweet> {
        let sweet = Sweet::new(input);

        self.collection.insert_one(&sweet).await?;

        tracing::info!(sweet_id = %sweet.id, "Sweet created successfully");
        Ok(sweet)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> SweetResult<Option<Sweet>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let sweet = self.collection.find_one(filter).await?;
        Ok(sweet)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> SweetResult<Vec<Sweet>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let sweets: Vec<Sweet> = cursor.try_collect().await?;

        Ok(sweets)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> SweetResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count > 0 {
            tracing::info!(sweet_id = %id, "Sweet deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> SweetResult<bool> {
        let filter = doc! { "name": name };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        price: Option<f64>,
        sort: Option<(SortField, SortOrder)>,
        limit: i64,
    ) -> SweetResult<Vec<Sweet>> {
        let filter = Self::build_search_filter(query, price);
        self.find_sorted(filter, sort, limit).await
    }

    #[instrument(skip(self))]
    async fn find_price_above(
        &self,
        price: f64,
        sort: Option<(SortField, SortOrder)>,
        limit: i64,
    ) -> SweetResult<Vec<Sweet>> {
        let filter = doc! { "price": { "$gt": price } };
        self.find_sorted(filter, sort, limit).await
    }

    #[instrument(skip(self))]
    async fn decrement_quantity(&self, id: Uuid, quantity: i32) -> SweetResult<Option<Sweet>> {
        // Conditional single-document update: the decrement only applies
        // when enough stock remains, so concurrent purchases cannot drive
        // the quantity negative or lose updates.
        let filter = doc! {
            "_id": to_bson(&id).unwrap_or(Bson::Null),
            "quantity": { "$gte": quantity },
        };
        let update = doc! { "$inc": { "quantity": -quantity } };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(filter, update)
            .with_options(options)
            .await?;

        if let Some(ref sweet) = updated {
            tracing::info!(sweet_id = %id, quantity, remaining = sweet.quantity, "Stock decremented");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn increment_quantity(&self, id: Uuid, quantity: i32) -> SweetResult<Option<Sweet>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let update = doc! { "$inc": { "quantity": quantity } };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(filter, update)
            .with_options(options)
            .await?;

        if let Some(ref sweet) = updated {
            tracing::info!(sweet_id = %id, quantity, updated_stock = sweet.quantity, "Stock incremented");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests would require a MongoDB instance; these cover the
    // filter and sort construction.

    #[test]
    fn test_build_search_filter_text_only() {
        let filter = MongoSweetRepository::build_search_filter("choco", None);
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 3);
    }

    #[test]
    fn test_build_search_filter_numeric_adds_price_clause() {
        let filter = MongoSweetRepository::build_search_filter("150", Some(150.0));
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 4);

        let price_clause = clauses[3].as_document().unwrap();
        assert_eq!(price_clause.get_f64("price").unwrap(), 150.0);
    }

    #[test]
    fn test_build_search_filter_is_case_insensitive() {
        let filter = MongoSweetRepository::build_search_filter("Choco", None);
        let clauses = filter.get_array("$or").unwrap();
        let name_clause = clauses[0].as_document().unwrap();
        let regex = name_clause.get_document("name").unwrap();
        assert_eq!(regex.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_sort_doc_directions() {
        let asc = MongoSweetRepository::sort_doc(Some((SortField::Price, SortOrder::Ascending)));
        assert_eq!(asc.unwrap().get_i32("price").unwrap(), 1);

        let desc = MongoSweetRepository::sort_doc(Some((SortField::Name, SortOrder::Descending)));
        assert_eq!(desc.unwrap().get_i32("name").unwrap(), -1);

        assert!(MongoSweetRepository::sort_doc(None).is_none());
    }
}
