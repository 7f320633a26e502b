pub mod model;
pub mod service;

pub use model::{ContactMessage, ContactMessageRequest, SubscribeRequest, SubscribeResponse, Subscriber};
pub use service::ContactService;
