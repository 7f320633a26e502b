pub mod poller;

pub use poller::{PaymentOutcome, PaymentPoller, PollPolicy, StatusSource, TickResult};
