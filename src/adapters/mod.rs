//! Adapters implementing the domain ports against real infrastructure.

pub mod github;
pub mod store;
