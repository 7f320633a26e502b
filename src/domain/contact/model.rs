use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessageRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
    /// Also join the mailing list
    #[serde(default)]
    pub subscribe: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeResponse {
    /// False when the address was already on the list
    pub subscribed: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub message: String,
}

/// A stored contact form message, as listed in the admin console
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub subscribed: bool,
    #[serde(default)]
    pub replied: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub subscribed_at: DateTime<Utc>,
}
