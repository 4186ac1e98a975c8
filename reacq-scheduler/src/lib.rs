//! Satellite re-acquisition search scheduler.
//!
//! Sizes a search around a target's predicted position from the age of its
//! orbital elements and submits timed pointing-offset patterns for each
//! potential observation window.

pub mod api;
pub mod config;
pub mod coordinator;
pub mod logging;
pub mod model;
pub mod operator;

pub use coordinator::{CoordinatorOptions, RunReport, ScheduleCoordinator};
