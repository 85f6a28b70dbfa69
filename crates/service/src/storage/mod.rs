//! Storage abstractions for service layer
//!
//! Process-lifetime collections guarded by a single reader/writer lock.

pub mod memory_store;

pub use memory_store::{MemoryStore, Record};
