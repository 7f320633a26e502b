use crate::domain::catalog::Product;
use crate::error::AppResult;
use crate::infrastructure::api::{ApiClient, FetchOptions, RequestOptions};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Reporting window: a number of days, or `all`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsRange(String);

impl AnalyticsRange {
    pub fn days(days: u32) -> Self {
        Self(days.to_string())
    }

    pub fn all() -> Self {
        Self("all".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AnalyticsRange {
    fn default() -> Self {
        Self::days(30)
    }
}

impl From<&str> for AnalyticsRange {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for AnalyticsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopProduct {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub sales_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_sales: Decimal,
    pub total_orders: u64,
    pub total_users: u64,
    pub top_product: Option<TopProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitSummary {
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
}

pub struct AnalyticsService {
    client: Arc<ApiClient>,
}

impl AnalyticsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn stats(&self, range: &AnalyticsRange) -> AppResult<DashboardStats> {
        let value = self.report("stats", range).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn monthly_sales(&self, range: &AnalyticsRange) -> AppResult<Value> {
        self.report("monthly_sales", range).await
    }

    pub async fn sales_over_time(&self, range: &AnalyticsRange) -> AppResult<Value> {
        self.report("sales_over_time", range).await
    }

    pub async fn profit_over_time(&self, range: &AnalyticsRange) -> AppResult<Value> {
        self.report("profit_over_time", range).await
    }

    pub async fn profit(&self, range: &AnalyticsRange) -> AppResult<ProfitSummary> {
        let value = self.report("profit", range).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn order_status_summary(&self, range: &AnalyticsRange) -> AppResult<Value> {
        self.report("order_status_summary", range).await
    }

    /// Best sellers, optionally limited to one category
    pub async fn top_products_by_category(
        &self,
        category: Option<i64>,
        range: &AnalyticsRange,
    ) -> AppResult<Value> {
        let category = category.map(|id| id.to_string()).unwrap_or_default();
        let endpoint = format!(
            "/admin/analytics/top_products_by_category/?category={}&range={}",
            category,
            urlencoding::encode(range.as_str())
        );

        self.client
            .fetch(&endpoint, RequestOptions::get(), FetchOptions::none())
            .await
    }

    pub async fn low_stock_products(&self) -> AppResult<Vec<Product>> {
        self.client
            .fetch_json("/products/low_stock/", RequestOptions::get(), FetchOptions::none())
            .await
    }

    async fn report(&self, name: &str, range: &AnalyticsRange) -> AppResult<Value> {
        let endpoint = format!(
            "/admin/analytics/{}/?range={}",
            name,
            urlencoding::encode(range.as_str())
        );

        self.client
            .fetch(&endpoint, RequestOptions::get(), FetchOptions::none())
            .await
    }
}
