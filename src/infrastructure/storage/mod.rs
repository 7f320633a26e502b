pub mod file_store;
pub mod key_value_store;
pub mod session_store;

pub use file_store::FileStore;
pub use key_value_store::KeyValueStore;
pub use session_store::SessionStore;
