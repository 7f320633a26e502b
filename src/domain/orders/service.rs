use super::{Order, OrderStatus, PaymentStatusResponse};
use crate::error::AppResult;
use crate::infrastructure::api::{ApiClient, FetchOptions, RequestOptions};
use serde_json::Value;
use std::sync::Arc;

pub struct OrderService {
    client: Arc<ApiClient>,
}

impl OrderService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Orders of the current user; cached for the TTL under `orders`
    pub async fn list(&self) -> AppResult<Vec<Order>> {
        self.client
            .fetch_json("/orders/", RequestOptions::get(), FetchOptions::cached("orders"))
            .await
    }

    pub async fn detail(&self, id: i64) -> AppResult<Order> {
        self.client
            .fetch_json(&format!("/orders/{}/", id), RequestOptions::get(), FetchOptions::none())
            .await
    }

    pub async fn order_status(&self, id: i64) -> AppResult<Value> {
        self.client
            .fetch(
                &format!("/orders/status/{}/", id),
                RequestOptions::get(),
                FetchOptions::none(),
            )
            .await
    }

    /// Current payment status of an order. Never cached: the poller depends
    /// on seeing every change.
    pub async fn payment_status(&self, id: i64) -> AppResult<OrderStatus> {
        let response: PaymentStatusResponse = self
            .client
            .fetch_json(
                &format!("/payment_status/{}/", id),
                RequestOptions::get(),
                FetchOptions::none(),
            )
            .await?;

        Ok(response.status)
    }
}
