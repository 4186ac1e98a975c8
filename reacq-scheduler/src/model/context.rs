use chrono::{DateTime, Utc};
use reacq_common::{OrbitClass, Result, TargetMetadata};

use super::{offset, staleness};

/// Everything needed to size the search for one target at one observation time.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetObservationContext {
    pub target_id: String,
    pub orbit_class: OrbitClass,
    pub element_epoch: DateTime<Utc>,
    pub observation_time: DateTime<Utc>,
}

impl TargetObservationContext {
    /// Build a context from fetched target metadata.
    ///
    /// Fails only if the element epoch is not a recognised timestamp.
    pub fn from_metadata(
        target_id: &str,
        metadata: &TargetMetadata,
        observation_time: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            target_id: target_id.to_string(),
            orbit_class: metadata.orbit_class(),
            element_epoch: metadata.element_epoch()?,
            observation_time,
        })
    }

    /// Age of the orbital elements at observation time, in days. Unclamped.
    pub fn age_days(&self) -> f64 {
        staleness::elapsed_days(self.element_epoch, self.observation_time)
    }

    pub fn radial_error_meters(&self) -> f64 {
        staleness::estimate_radial_error_meters(self.element_epoch, self.observation_time)
    }

    pub fn search_offset_meters(&self) -> f64 {
        offset::scaled_offset_meters(self.orbit_class, self.age_days(), self.radial_error_meters())
    }
}
