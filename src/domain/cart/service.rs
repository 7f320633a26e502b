use super::{Cart, CheckoutRequest, CheckoutResponse};
use crate::error::AppResult;
use crate::infrastructure::api::{ApiClient, FetchOptions, RequestOptions};
use serde_json::json;
use std::sync::Arc;

pub struct CartService {
    client: Arc<ApiClient>,
}

impl CartService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> AppResult<Cart> {
        self.client
            .fetch_json("/cart/", RequestOptions::get(), FetchOptions::none())
            .await
    }

    pub async fn add_item(&self, product_id: i64, quantity: u32) -> AppResult<Cart> {
        self.post("/cart/add_item/", json!({"product_id": product_id, "quantity": quantity}))
            .await
    }

    pub async fn remove_item(&self, item_id: i64) -> AppResult<Cart> {
        self.post("/cart/remove_item/", json!({"item_id": item_id})).await
    }

    pub async fn increase_item(&self, product_id: i64) -> AppResult<Cart> {
        self.post("/cart/increase_item/", json!({"product_id": product_id}))
            .await
    }

    pub async fn decrease_item(&self, product_id: i64) -> AppResult<Cart> {
        self.post("/cart/decrease_item/", json!({"product_id": product_id}))
            .await
    }

    /// Create the payment for the current cart
    pub async fn checkout(&self, request: &CheckoutRequest) -> AppResult<CheckoutResponse> {
        let response: CheckoutResponse = self
            .client
            .fetch_json("/cart/checkout/", RequestOptions::post_json(request)?, FetchOptions::none())
            .await?;

        tracing::info!(order_id = response.order_id, "Checkout created payment");
        Ok(response)
    }

    async fn post(&self, endpoint: &str, body: serde_json::Value) -> AppResult<Cart> {
        self.client
            .fetch_json(endpoint, RequestOptions::post_json(&body)?, FetchOptions::none())
            .await
    }
}
