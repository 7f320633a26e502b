use super::{TicketAdminService, TicketVerification};
use crate::error::{AppError, AppResult};
use regex::Regex;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

static TICKET_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("ticket code pattern is valid")
});

/// First UUID found in decoded QR text
pub fn extract_ticket_code(text: &str) -> Option<Uuid> {
    TICKET_CODE
        .find(text)
        .and_then(|m| Uuid::parse_str(m.as_str()).ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Valid { event: String },
    AlreadyUsed,
    Invalid,
    InvalidFormat,
    Unexpected(String),
}

impl ScanOutcome {
    pub fn from_verification(result: AppResult<TicketVerification>) -> Self {
        match result {
            Ok(verification) => Self::Valid {
                event: verification.event,
            },
            Err(err) => Self::from_error(&err),
        }
    }

    fn from_error(err: &AppError) -> Self {
        match (err.detail(), err.status_code()) {
            (Some("Already used"), _) => Self::AlreadyUsed,
            (Some("Invalid ticket"), _) => Self::Invalid,
            (_, Some(StatusCode::BAD_REQUEST)) => Self::AlreadyUsed,
            (_, Some(StatusCode::NOT_FOUND)) => Self::Invalid,
            _ => Self::Unexpected(err.to_string()),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Valid { .. } => Severity::Success,
            Self::AlreadyUsed => Severity::Warning,
            Self::Invalid | Self::InvalidFormat | Self::Unexpected(_) => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Valid { event } => format!("Valid ticket: {}", event),
            Self::AlreadyUsed => "Ticket already used".to_string(),
            Self::Invalid => "Invalid ticket".to_string(),
            Self::InvalidFormat => "Invalid QR format".to_string(),
            Self::Unexpected(reason) => format!("Unexpected error: {}", reason),
        }
    }
}

/// Turns QR scans into verification results, one at a time
pub struct TicketScanner {
    tickets: Arc<TicketAdminService>,
    busy: AtomicBool,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TicketScanner {
    pub fn new(tickets: Arc<TicketAdminService>) -> Self {
        Self {
            tickets,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Verify the ticket in `text`. Returns `None` when a previous scan is
    /// still being verified; the camera keeps firing while a code is in view.
    pub async fn handle_scan(&self, text: &str) -> Option<ScanOutcome> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Scan ignored, verification in flight");
            return None;
        }
        let _guard = BusyGuard(&self.busy);

        let Some(code) = extract_ticket_code(text) else {
            tracing::warn!(raw = text, "QR payload without ticket code");
            return Some(ScanOutcome::InvalidFormat);
        };

        let outcome = ScanOutcome::from_verification(self.tickets.verify(code).await);
        tracing::info!(ticket = %code, outcome = ?outcome, "Ticket scanned");
        Some(outcome)
    }
}
