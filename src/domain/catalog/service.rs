use super::{Category, Product, ProductListing};
use crate::error::AppResult;
use crate::infrastructure::api::{ApiClient, FetchOptions, RequestOptions};
use std::sync::Arc;

/// Filters of the storefront product list
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub page: u32,
    /// Parent category id
    pub category: Option<i64>,
    /// Leaf category id; wins over `category`
    pub subcategory: Option<i64>,
    pub search: Option<String>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            category: None,
            subcategory: None,
            search: None,
        }
    }
}

impl ProductQuery {
    pub fn endpoint(&self) -> String {
        let mut url = format!("/products/?page={}", self.page);

        if let Some(subcategory) = self.subcategory {
            url.push_str(&format!("&category={}", subcategory));
        } else if let Some(category) = self.category {
            url.push_str(&format!("&category__parent={}", category));
        }

        if let Some(search) = self.search.as_deref().filter(|q| !q.is_empty()) {
            url.push_str(&format!("&search={}", urlencoding::encode(search)));
        }

        url
    }

    pub fn cache_key(&self) -> String {
        format!("products:{}", self.endpoint())
    }
}

/// Storefront catalog: categories and products, cached for the TTL
pub struct CatalogService {
    client: Arc<ApiClient>,
}

impl CatalogService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn categories(&self) -> AppResult<Vec<Category>> {
        self.client
            .fetch_json("/categories/", RequestOptions::get(), FetchOptions::cached("categories"))
            .await
    }

    pub async fn products(&self, query: &ProductQuery) -> AppResult<ProductListing> {
        self.client
            .fetch_json(
                &query.endpoint(),
                RequestOptions::get(),
                FetchOptions::cached(query.cache_key()),
            )
            .await
    }

    /// Trending products, optionally limited to one parent category slug
    pub async fn trending(&self, parent_slug: Option<&str>) -> AppResult<ProductListing> {
        let mut url = "/products/?trending=true".to_string();
        if let Some(slug) = parent_slug {
            url.push_str(&format!("&category__parent__slug={}", urlencoding::encode(slug)));
        }

        let cache_key = format!("trending:{}", parent_slug.unwrap_or("all"));
        self.client
            .fetch_json(&url, RequestOptions::get(), FetchOptions::cached(cache_key))
            .await
    }

    pub async fn product(&self, id: i64) -> AppResult<Product> {
        self.client
            .fetch_json(&format!("/products/{}/", id), RequestOptions::get(), FetchOptions::none())
            .await
    }
}
