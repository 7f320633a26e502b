use super::{TicketScan, TicketVerification};
use crate::error::AppResult;
use crate::infrastructure::api::{ApiClient, FetchOptions, RequestOptions};
use std::sync::Arc;
use uuid::Uuid;

pub struct TicketAdminService {
    client: Arc<ApiClient>,
}

impl TicketAdminService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Verify and consume a ticket. Fails with 400 `Already used` or 404
    /// `Invalid ticket`.
    pub async fn verify(&self, code: Uuid) -> AppResult<TicketVerification> {
        self.client
            .fetch_json(
                &format!("/events/verify/{}/", code),
                RequestOptions::get(),
                FetchOptions::none(),
            )
            .await
    }

    pub async fn scan(&self, code: Uuid) -> AppResult<TicketScan> {
        self.client
            .fetch_json(
                &format!("/events/scan/{}/", code),
                RequestOptions::get(),
                FetchOptions::none(),
            )
            .await
    }
}
