//! Age-bucketed scaling of the radial error into a search offset
//!
//! Each orbit class has its own table of `(age threshold in days, fraction)`
//! pairs, thresholds strictly increasing, the last one unbounded. The first
//! bucket whose threshold is not below the element age wins.

use reacq_common::OrbitClass;

/// Ordered `(threshold_days, fraction)` buckets.
pub type AgeOffsetTable = &'static [(f64, f64)];

const LEO_TABLE: AgeOffsetTable = &[
    (1.0, 1.0 / 4.0),
    (3.0, 1.0 / 2.0),
    (5.0, 1.0),
    (7.0, 2.0),
    (12.0, 5.0),
    (f64::INFINITY, 10.0),
];

const MEO_TABLE: AgeOffsetTable = &[
    (1.0, 1.0 / 4.0),
    (3.0, 1.0 / 3.0),
    (5.0, 1.0 / 2.0),
    (7.0, 1.0),
    (12.0, 2.0),
    (f64::INFINITY, 5.0),
];

const GEOSYNCHRONOUS_TABLE: AgeOffsetTable = &[
    (1.0, 1.0 / 4.0),
    (3.0, 1.0 / 3.0),
    (5.0, 1.0 / 2.0),
    (7.0, 3.0 / 4.0),
    (12.0, 1.0),
    (f64::INFINITY, 2.0),
];

const GEOSTATIONARY_TABLE: AgeOffsetTable = &[
    (1.0, 1.0 / 5.0),
    (3.0, 1.0 / 4.0),
    (5.0, 1.0 / 3.0),
    (7.0, 1.0 / 2.0),
    (12.0, 3.0 / 4.0),
    (f64::INFINITY, 1.0),
];

/// Bucket table for an orbit class.
pub fn age_offset_table(orbit_class: OrbitClass) -> AgeOffsetTable {
    match orbit_class {
        OrbitClass::Leo => LEO_TABLE,
        OrbitClass::Meo => MEO_TABLE,
        OrbitClass::Geosynchronous => GEOSYNCHRONOUS_TABLE,
        OrbitClass::Geostationary => GEOSTATIONARY_TABLE,
    }
}

/// Fraction of the radial error to search along and across track.
pub fn offset_fraction(orbit_class: OrbitClass, age_days: f64) -> f64 {
    let table = age_offset_table(orbit_class);

    // NaN compares false against every threshold and lands in the catch-all.
    table
        .iter()
        .find(|(threshold, _)| age_days <= *threshold)
        .or_else(|| table.last())
        .map(|(_, fraction)| *fraction)
        .unwrap_or(1.0)
}

/// Along-track/cross-track search offset in meters.
pub fn scaled_offset_meters(orbit_class: OrbitClass, age_days: f64, radial_error_meters: f64) -> f64 {
    radial_error_meters * offset_fraction(orbit_class, age_days)
}
