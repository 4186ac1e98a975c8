use chrono::{DateTime, Utc};

/// Element age beyond which the error estimate stops growing.
pub const MAX_STALENESS_DAYS: f64 = 5.0;

/// Power-law exponent of the staleness model.
///
/// Empirical fit of TLE position drift against element age.
pub const STALENESS_EXPONENT: f64 = 1.5276;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Elapsed time from `from` to `to` in fractional days. Negative if `to` is earlier.
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to.signed_duration_since(from);
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0 / SECONDS_PER_DAY,
        None => delta.num_seconds() as f64 / SECONDS_PER_DAY,
    }
}

/// Radial error in meters from a staleness in days, clamped to `[0, 5]` days.
pub fn radial_error_for_staleness(staleness_days: f64) -> f64 {
    let days = staleness_days.clamp(0.0, MAX_STALENESS_DAYS);
    days.powf(STALENESS_EXPONENT) * 1000.0
}

/// Estimate how far (meters) the predicted position may be off, given the
/// epoch of the orbital elements and the time of observation.
pub fn estimate_radial_error_meters(
    element_epoch: DateTime<Utc>,
    observation_time: DateTime<Utc>,
) -> f64 {
    radial_error_for_staleness(elapsed_days(element_epoch, observation_time))
}
