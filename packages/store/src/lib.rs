//! Client-side state for the fleet back office: durable key/value storage,
//! the persisted authentication session, shared models and configuration.

pub mod config;
pub mod models;
pub mod session;
pub mod storage;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use config::FleetConfig;
pub use models::{field, record_id, value_to_string, Record, RecordId, Role, UserProfile};
pub use session::Session;
pub use storage::{KeyValueStore, StorageError};
