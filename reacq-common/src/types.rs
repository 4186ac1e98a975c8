use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::{self, wire};

/// Orbit regime of a satellite target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrbitClass {
    #[default]
    Leo,
    Meo,
    Geosynchronous,
    Geostationary,
}

impl OrbitClass {
    /// Map a metadata label onto an orbit class.
    ///
    /// Never fails: anything unrecognised is treated as LEO.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "MEO" => OrbitClass::Meo,
            "GEOSYNCHRONOUS" => OrbitClass::Geosynchronous,
            "GEOSTATIONARY" => OrbitClass::Geostationary,
            _ => OrbitClass::Leo,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrbitClass::Leo => "LEO",
            OrbitClass::Meo => "MEO",
            OrbitClass::Geosynchronous => "GEOSYNCHRONOUS",
            OrbitClass::Geostationary => "GEOSTATIONARY",
        }
    }
}

impl std::fmt::Display for OrbitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the mount tracks during a search step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingType {
    /// Fixed celestial rate
    #[default]
    Sidereal,
    /// Rate matched to the target's apparent motion
    TargetRate,
}

impl TrackingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingType::Sidereal => "SIDEREAL",
            TrackingType::TargetRate => "TARGET_RATE",
        }
    }
}

impl std::fmt::Display for TrackingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Satellite target metadata as returned by the target lookup endpoint.
///
/// Only the fields the scheduler needs are modelled; anything else in the
/// response is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetMetadata {
    /// Raw orbit regime label, e.g. "LEO"
    #[serde(default)]
    pub orbit_type: Option<String>,
    /// Epoch of the current orbital elements, e.g. "2024-03-01T06:12:00.000Z"
    pub tle_epoch: String,
}

impl TargetMetadata {
    pub fn orbit_class(&self) -> OrbitClass {
        self.orbit_type
            .as_deref()
            .map(OrbitClass::from_label)
            .unwrap_or_default()
    }

    pub fn element_epoch(&self) -> crate::Result<DateTime<Utc>> {
        time::parse_timestamp(&self.tle_epoch)
    }
}

/// A time interval during which a target is predicted to be observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialWindow {
    #[serde(with = "wire")]
    pub first_observable_time: DateTime<Utc>,
    #[serde(with = "wire")]
    pub last_observable_time: DateTime<Utc>,
}

impl PotentialWindow {
    /// Windows ending exactly on UTC midnight are padding, not real passes.
    pub fn is_placeholder(&self) -> bool {
        time::is_utc_midnight(&self.last_observable_time)
    }
}

/// One timed pointing offset of a search pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStep {
    pub along_track_offset_meters: f64,
    pub cross_track_offset_meters: f64,
    pub radial_offset_meters: f64,
    #[serde(with = "wire")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "wire")]
    pub end_time: DateTime<Utc>,
}

/// The search instruction submitted for one target and one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub steps: Vec<SearchStep>,
    pub target_id: String,
    pub tracking_type: TrackingType,
}

impl ScheduleRequest {
    pub fn new(target_id: impl Into<String>, tracking_type: TrackingType, steps: Vec<SearchStep>) -> Self {
        Self {
            steps,
            target_id: target_id.into(),
            tracking_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_orbit_class_falls_back_to_leo() {
        assert_eq!(OrbitClass::from_label("GEOSTATIONARY"), OrbitClass::Geostationary);
        assert_eq!(OrbitClass::from_label("meo"), OrbitClass::Meo);
        assert_eq!(OrbitClass::from_label("HEO"), OrbitClass::Leo);
        assert_eq!(OrbitClass::from_label(""), OrbitClass::Leo);

        let metadata = TargetMetadata {
            orbit_type: None,
            tle_epoch: "2024-03-01T00:00:00Z".to_string(),
        };
        assert_eq!(metadata.orbit_class(), OrbitClass::Leo);
    }

    #[test]
    fn test_target_metadata_ignores_unknown_fields() {
        let json = r#"{
            "id": "abc",
            "orbitType": "GEOSYNCHRONOUS",
            "tleEpoch": "2024-03-01T06:00:00.500Z",
            "noradId": 12345
        }"#;
        let metadata: TargetMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.orbit_class(), OrbitClass::Geosynchronous);
        assert_eq!(
            metadata.element_epoch().unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap() + chrono::Duration::milliseconds(500)
        );
    }

    #[test]
    fn test_potential_window_placeholder() {
        let json = r#"[
            {"firstObservableTime": "2024-03-01T20:00:00.000Z", "lastObservableTime": "2024-03-01T20:07:30.000Z"},
            {"firstObservableTime": "2024-03-01T23:55:00.000Z", "lastObservableTime": "2024-03-02T00:00:00.000Z"}
        ]"#;
        let windows: Vec<PotentialWindow> = serde_json::from_str(json).unwrap();
        assert!(!windows[0].is_placeholder());
        assert!(windows[1].is_placeholder());
    }

    #[test]
    fn test_schedule_request_wire_shape() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        let request = ScheduleRequest::new(
            "target-1",
            TrackingType::TargetRate,
            vec![SearchStep {
                along_track_offset_meters: -1500.0,
                cross_track_offset_meters: 1500.0,
                radial_offset_meters: 0.0,
                start_time: start,
                end_time: start + chrono::Duration::seconds(10),
            }],
        );

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["targetId"], "target-1");
        assert_eq!(value["trackingType"], "TARGET_RATE");
        let step = &value["steps"][0];
        assert_eq!(step["alongTrackOffsetMeters"], -1500.0);
        assert_eq!(step["crossTrackOffsetMeters"], 1500.0);
        assert_eq!(step["radialOffsetMeters"], 0.0);
        assert_eq!(step["startTime"], "2024-03-01T20:00:00.000Z");
        assert_eq!(step["endTime"], "2024-03-01T20:00:10.000Z");

        let text = serde_json::to_string(&request).unwrap();
        assert!(text.starts_with(r#"{"steps":"#));
    }
}
