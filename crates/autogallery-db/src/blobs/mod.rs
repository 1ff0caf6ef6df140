//! Blob store implementations.

mod local;

pub use local::{LocalBlobStore, MAX_BLOB_BYTES};
