use crate::domain::contact::{ContactMessage, Subscriber};
use crate::error::{AppError, AppResult};
use crate::infrastructure::api::{ApiClient, FetchOptions, RequestOptions};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

pub const REPLY_SUBJECT: &str = "Re: Your message to Uncanny Valley";

#[derive(Debug, Clone, Serialize)]
pub struct EmailBlast {
    pub subject: String,
    pub body: String,
    pub emails: Vec<String>,
}

/// Contact messages and the mailing list
pub struct MessageAdminService {
    client: Arc<ApiClient>,
}

impl MessageAdminService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn messages(&self) -> AppResult<Vec<ContactMessage>> {
        self.client
            .fetch_json("/contact/admin/messages/", RequestOptions::get(), FetchOptions::none())
            .await
    }

    pub async fn reply(&self, message_id: i64, body: &str) -> AppResult<()> {
        let payload = json!({ "subject": REPLY_SUBJECT, "body": body });
        self.client
            .fetch(
                &format!("/contact/admin/message/{}/reply/", message_id),
                RequestOptions::post_json(&payload)?,
                FetchOptions::none(),
            )
            .await?;

        tracing::info!(message_id, "Replied to contact message");
        Ok(())
    }

    pub async fn mailing_list(&self) -> AppResult<Vec<Subscriber>> {
        self.client
            .fetch_json(
                "/contact/admin/mailing-list/",
                RequestOptions::get(),
                FetchOptions::none(),
            )
            .await
    }

    pub async fn email_blast(&self, blast: &EmailBlast) -> AppResult<()> {
        if blast.subject.trim().is_empty() || blast.body.trim().is_empty() || blast.emails.is_empty() {
            return Err(AppError::BadRequest("Missing fields".to_string()));
        }

        self.client
            .fetch(
                "/contact/admin/email-blast/",
                RequestOptions::post_json(blast)?,
                FetchOptions::none(),
            )
            .await?;

        tracing::info!(recipients = blast.emails.len(), "Email blast sent");
        Ok(())
    }

    pub async fn remove_subscriber(&self, id: i64) -> AppResult<()> {
        self.client
            .fetch(
                &format!("/contact/admin/mailing-list/{}/", id),
                RequestOptions::delete(),
                FetchOptions::none(),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_subscriber(&self, id: i64) -> AppResult<()> {
        self.client
            .fetch(
                &format!("/contact/admin/mailing-list/{}/delete/", id),
                RequestOptions::delete(),
                FetchOptions::none(),
            )
            .await?;
        Ok(())
    }
}
