//! Sweet shop inventory domain.
//!
//! Layered the same way as every domain crate here: `handlers` expose the
//! HTTP endpoints, `service` owns the business rules (duplicate-name
//! checks, stock invariants, the search fallback), and persistence sits
//! behind the [`SweetRepository`] trait with a MongoDB implementation in
//! [`mongodb`]. `models` holds the entity, request DTOs and response
//! envelopes shared by all three.
//!
//! The service is generic over the repository so tests drive it with a
//! mock instead of a database.
//!
//! ```rust,no_run
//! use domain_sweets::{handlers, mongodb::MongoSweetRepository, service::SweetService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoSweetRepository::new(client.database("sweetshop"));
//! let router = handlers::router(SweetService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{SweetError, SweetResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateSweet, PurchaseLine, PurchaseRequest, RestockRequest, SearchParams, SortField,
    SortOrder, Sweet, SweetCategory, SweetView,
};
pub use mongodb::MongoSweetRepository;
pub use repository::SweetRepository;
pub use service::SweetService;
