//! Storage adapters implementing the outbound ports.

pub mod memory;
pub mod sqlite_store;

pub use memory::MemoryStore;
pub use sqlite_store::SqliteStore;
