//! Shared data model for the re-acquisition search scheduler.
//!
//! Everything that crosses the boundary to the remote scheduling service lives
//! here: target metadata, potential observation windows, the search steps we
//! generate and the request that carries them.

pub mod error;
pub mod time;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    OrbitClass, PotentialWindow, ScheduleRequest, SearchStep, TargetMetadata, TrackingType,
};
