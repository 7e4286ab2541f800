use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Sweet category
///
/// Closed set of shop categories. Wire names are the shop's display names,
/// including the hyphenated ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum SweetCategory {
    Chocolate,
    Candy,
    Cake,
    Pastry,
    #[serde(rename = "Nut-based")]
    #[strum(serialize = "Nut-based")]
    NutBased,
    #[serde(rename = "Milk-based")]
    #[strum(serialize = "Milk-based")]
    MilkBased,
    #[serde(rename = "Dry Fruit")]
    #[strum(serialize = "Dry Fruit")]
    DryFruit,
    #[serde(rename = "Fruit-based")]
    #[strum(serialize = "Fruit-based")]
    FruitBased,
    #[serde(rename = "Sugar-free")]
    #[strum(serialize = "Sugar-free")]
    SugarFree,
}

/// Sweet entity - represents a sweet stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Sweet {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Sweet name, unique across the inventory
    pub name: String,
    /// Shop category
    pub category: SweetCategory,
    /// Unit price, strictly positive
    pub price: f64,
    /// Units in stock, never negative
    pub quantity: i32,
    /// Percentage off `price`, 0-100
    #[serde(default)]
    pub discount: f64,
    /// Optional short description
    pub description: Option<String>,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Sweet {
    /// Create a new sweet from the CreateSweet DTO
    pub fn new(input: CreateSweet) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            price: input.price,
            quantity: input.quantity,
            discount: input.discount,
            description: input.description,
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the sweet can currently be purchased.
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Price after discount, rounded to two decimal places.
    pub fn final_price(&self) -> f64 {
        (self.price * (1.0 - self.discount / 100.0) * 100.0).round() / 100.0
    }
}

/// DTO for creating a new sweet
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSweet {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub category: SweetCategory,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount: f64,
    #[validate(length(max = 200))]
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// API representation of a sweet: the stored fields plus the derived
/// `is_available` and `final_price`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SweetView {
    pub id: Uuid,
    pub name: String,
    pub category: SweetCategory,
    pub price: f64,
    pub quantity: i32,
    pub discount: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub final_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Sweet> for SweetView {
    fn from(sweet: Sweet) -> Self {
        let is_available = sweet.is_available();
        let final_price = sweet.final_price();
        Self {
            id: sweet.id,
            name: sweet.name,
            category: sweet.category,
            price: sweet.price,
            quantity: sweet.quantity,
            discount: sweet.discount,
            description: sweet.description,
            image_url: sweet.image_url,
            is_available,
            final_price,
            created_at: sweet.created_at,
            updated_at: sweet.updated_at,
        }
    }
}

/// Sort field accepted by the search endpoint.
///
/// Anything other than `price` or `name` is ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Name,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "price" => Some(SortField::Price),
            "name" => Some(SortField::Name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Name => "name",
        }
    }
}

/// Sort direction; any value other than `desc` sorts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn parse(value: &str) -> Self {
        if value == "desc" {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

/// Query parameters for the search endpoint
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct SearchParams {
    /// Text matched against name, category and description; a numeric value
    /// also matches on price
    #[serde(default)]
    pub query: String,
    /// Sort field: `price` or `name` (other values ignored)
    pub sort_by: Option<String>,
    /// Sort direction: `asc` (default) or `desc`
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String {
    "asc".to_string()
}

/// A single line item in a purchase request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PurchaseLine {
    /// Identifier of the sweet to purchase
    pub sweet_id: Uuid,
    /// Units to purchase, must be positive
    pub quantity: i32,
}

/// Request body for the purchase endpoint
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PurchaseRequest {
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<PurchaseLine>,
}

/// Outcome of one purchase line
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseLineResult {
    pub sweet_id: Uuid,
    pub status: bool,
    pub message: String,
    pub remaining_quantity: i32,
}

/// Request body for the restock endpoint
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RestockRequest {
    /// Identifier of the sweet to restock
    pub sweet_id: Uuid,
    /// Units to add, must be positive
    pub quantity: i32,
}

/// Success envelope for sweet creation
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSweetResponse {
    pub status: bool,
    #[schema(value_type = String, format = Uuid)]
    pub sweet_id: Uuid,
    pub message: String,
}

/// Success envelope carrying a list of sweets
#[derive(Debug, Serialize, ToSchema)]
pub struct SweetListResponse {
    pub status: bool,
    pub sweets: Vec<SweetView>,
    pub message: String,
}

/// Success envelope carrying a single sweet
#[derive(Debug, Serialize, ToSchema)]
pub struct SweetResponse {
    pub status: bool,
    pub sweet: SweetView,
    pub message: String,
}

/// Success envelope with only a message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: bool,
    pub message: String,
}

/// Success envelope for a completed purchase
#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseResponse {
    pub status: bool,
    pub results: Vec<PurchaseLineResult>,
    pub message: String,
}

/// Success envelope for a completed restock
#[derive(Debug, Serialize, ToSchema)]
pub struct RestockResponse {
    pub status: bool,
    pub message: String,
    pub updated_stock: i32,
}
