use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Successful `GET /events/verify/{code}/`. The ticket is marked used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketVerification {
    pub valid: bool,
    /// Event product title
    pub event: String,
    pub ticket: Uuid,
    pub used_at: Option<DateTime<Utc>>,
}

/// `GET /events/scan/{code}/`: reports reuse in the body instead of failing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketScan {
    pub valid: bool,
    pub used: bool,
    pub event: String,
    pub ticket_id: Uuid,
    pub used_at: Option<DateTime<Utc>>,
}
