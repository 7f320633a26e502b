pub mod model;
pub mod service;

pub use model::{Order, OrderItem, OrderStatus, PaymentStatusResponse};
pub use service::OrderService;
