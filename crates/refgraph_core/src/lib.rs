//! Core types for the refgraph object tracker.
//!
//! This crate implements a manual reference-count tracker with cascading
//! reclamation over an explicit object-to-object reference graph:
//! - `Handle` - Opaque identifier naming a tracked object
//! - `Tracker` - Object table, reference bookkeeping, and the collection pass
//! - `TrackerError` - Failure surface for operations on stale handles

pub mod errors;
pub mod handle;
pub mod tracker;

pub use errors::{HandleRole, TrackerError, TrackerResult};
pub use handle::Handle;
pub use tracker::Tracker;
