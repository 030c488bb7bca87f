//! Key-value persistence adapters.
//!
//! Every backend stores JSON blobs under fixed keys and gets `ProfileStore` /
//! `IntakeLogStore` through [`blob::BlobStore`], so the blob format is the
//! same whichever backend is configured.

pub mod blob;
pub mod json_store;
pub mod memory_store;
pub mod sqlite_store;

pub use blob::BlobStore;
pub use json_store::JsonStore;
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
