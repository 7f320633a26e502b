//! Admin console: analytics, catalog management, messages and mailing list.
//!
//! Every call requires a staff access token; the backend answers 401/403
//! otherwise.

pub mod analytics;
pub mod messages;
pub mod products;

pub use analytics::{AnalyticsRange, AnalyticsService, DashboardStats, ProfitSummary};
pub use messages::{EmailBlast, MessageAdminService};
pub use products::{BulkUpload, Download, ProductAdminService};
