//! Storage module
//!
//! Provides the persistent key-value storage the organizer document and
//! the hydration counter are written to.

pub mod kv_store;

pub use kv_store::{FileKvStore, KeyValueStore, MemoryKvStore, SharedStorage};
