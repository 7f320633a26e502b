pub mod model;
pub mod scanner;
pub mod service;

pub use model::{TicketScan, TicketVerification};
pub use scanner::{extract_ticket_code, ScanOutcome, Severity, TicketScanner};
pub use service::TicketAdminService;
