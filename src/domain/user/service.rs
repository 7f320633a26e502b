use super::User;
use crate::error::AppResult;
use crate::infrastructure::api::{ApiClient, FetchOptions, RequestOptions};
use serde_json::Value;
use std::sync::Arc;

/// Admin management of user accounts
pub struct UserAdminService {
    client: Arc<ApiClient>,
}

impl UserAdminService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.client
            .fetch_json("/admin/users/", RequestOptions::get(), FetchOptions::none())
            .await
    }

    pub async fn toggle_staff(&self, user_id: i64) -> AppResult<Value> {
        self.client
            .fetch(
                &format!("/admin/users/{}/toggle_staff/", user_id),
                RequestOptions::post(),
                FetchOptions::none(),
            )
            .await
    }

    pub async fn promote_to_owner(&self, user_id: i64) -> AppResult<Value> {
        self.client
            .fetch(
                &format!("/admin/users/{}/promote_to_owner/", user_id),
                RequestOptions::post(),
                FetchOptions::none(),
            )
            .await
    }
}
