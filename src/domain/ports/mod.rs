//! Port traits the pipeline talks to the outside world through.
//!
//! The push pipeline interacts with the remote tracker, the processed-state
//! store, and the remote dedup index exclusively through these traits,
//! keeping the domain and service layers decoupled from GitHub and from the
//! on-disk record format.

pub mod index;
pub mod store;
pub mod tracker;

pub use index::RemoteIndex;
pub use store::ProcessedStore;
pub use tracker::{LabelSpec, ProjectTracker};
