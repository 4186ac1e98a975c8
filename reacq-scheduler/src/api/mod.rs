//! Scheduling service collaborator
//!
//! The coordinator only talks to the service through [`SchedulingApi`];
//! [`ApiClient`] is the HTTP implementation.

mod client;

pub use client::ApiClient;

use async_trait::async_trait;
use reacq_common::{PotentialWindow, Result, ScheduleRequest, TargetMetadata};

#[async_trait]
pub trait SchedulingApi {
    /// Look up orbit and element metadata for one target.
    async fn fetch_target(&self, target_id: &str) -> Result<TargetMetadata>;

    /// Potential observation windows for a target up to `until` (wire timestamp).
    ///
    /// Implementations drop placeholder windows ending exactly at UTC midnight.
    async fn fetch_potentials(&self, target_id: &str, until: &str) -> Result<Vec<PotentialWindow>>;

    /// Submit one search instruction.
    async fn submit_schedule(&self, request: &ScheduleRequest) -> Result<()>;
}

/// Drop placeholder windows (ending exactly at UTC midnight).
pub fn discard_placeholder_windows(windows: Vec<PotentialWindow>) -> Vec<PotentialWindow> {
    windows.into_iter().filter(|w| !w.is_placeholder()).collect()
}
