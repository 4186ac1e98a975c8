//! Search geometry model
//!
//! Pure computations, leaf first:
//! - `staleness`: element age → radial position error
//! - `offset`: orbit class + age → along/cross-track search offset
//! - `pattern`: search offset + window → timed pointing steps

pub mod context;
pub mod offset;
pub mod pattern;
pub mod staleness;

pub use context::TargetObservationContext;
pub use offset::{offset_fraction, scaled_offset_meters};
pub use pattern::{PatternTiming, SearchPattern, generate_steps, generate_steps_for};
pub use staleness::estimate_radial_error_meters;
