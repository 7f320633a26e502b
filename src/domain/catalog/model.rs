use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// Category as embedded in a product (`category_obj`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default)]
    pub parent_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub product: i64,
    pub image: Option<String>,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub order: i32,
}

/// Event details attached to ticketed products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub category: i64,
    #[serde(default)]
    pub category_obj: Option<CategorySummary>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sales_count: i64,
    pub price: Decimal,
    #[serde(default)]
    pub discounted_price: Option<Decimal>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub attributes: Option<Value>,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub event_data: Option<EventData>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Price the customer pays: the discounted price when one is set below
    /// the list price
    pub fn effective_price(&self) -> Decimal {
        match self.discounted_price {
            Some(discounted) if discounted > Decimal::ZERO && discounted < self.price => discounted,
            _ => self.price,
        }
    }

    pub fn is_event(&self) -> bool {
        self.event_data.is_some()
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Page of a DRF-paginated product list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub count: i64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Product>,
}

/// Product list endpoints answer with a page or, when pagination is off, a
/// bare array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductListing {
    Page(ProductPage),
    All(Vec<Product>),
}

impl ProductListing {
    pub fn products(&self) -> &[Product] {
        match self {
            ProductListing::Page(page) => &page.results,
            ProductListing::All(products) => products,
        }
    }

    pub fn into_products(self) -> Vec<Product> {
        match self {
            ProductListing::Page(page) => page.results,
            ProductListing::All(products) => products,
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self, ProductListing::Page(page) if page.next.is_some())
    }
}
