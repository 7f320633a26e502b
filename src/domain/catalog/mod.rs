pub mod model;
pub mod service;

pub use model::{Category, CategorySummary, EventData, Product, ProductImage, ProductListing, ProductPage};
pub use service::{CatalogService, ProductQuery};
