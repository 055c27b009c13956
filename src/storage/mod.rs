//! Storage module for stokemeet
//!
//! Device-local key-value persistence. SQLite on disk, a map in tests.

mod database;
mod memory;
mod store;

pub use database::Database;
pub use memory::MemoryStore;
pub use store::KeyValueStore;
