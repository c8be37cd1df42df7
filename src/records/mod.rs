//! Name record persistence

pub mod error;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::RecordStore;
pub use types::{NameRecord, NewRecord, RecordStats};
