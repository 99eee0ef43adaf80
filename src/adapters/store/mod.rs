//! Processed-store adapters.

pub mod jsonl;

pub use jsonl::JsonlStore;
