use super::{ContactMessageRequest, SubscribeRequest, SubscribeResponse};
use crate::error::{AppError, AppResult};
use crate::infrastructure::api::{ApiClient, FetchOptions, RequestOptions};
use std::sync::Arc;

pub struct ContactService {
    client: Arc<ApiClient>,
}

impl ContactService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn send_message(&self, request: &ContactMessageRequest) -> AppResult<()> {
        if request.email.trim().is_empty() || request.message.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Email and message are required".to_string(),
            ));
        }

        self.client
            .fetch("/contact/send/", RequestOptions::post_json(request)?, FetchOptions::none())
            .await?;

        tracing::info!(subscribe = request.subscribe, "Contact message sent");
        Ok(())
    }

    pub async fn subscribe(&self, request: &SubscribeRequest) -> AppResult<SubscribeResponse> {
        if request.email.trim().is_empty() {
            return Err(AppError::BadRequest("Email is required".to_string()));
        }

        self.client
            .fetch_json(
                "/contact/subscribe/",
                RequestOptions::post_json(request)?,
                FetchOptions::none(),
            )
            .await
    }
}
