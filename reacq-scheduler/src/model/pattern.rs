//! Search pattern step generation
//!
//! A pattern is an ordered list of planned offsets, expressed as multiples of
//! the scaled search offset. Steps are laid out back to back from the window
//! start, each `step` long and separated by `gap`, and may not run past
//! `min(window_start + max_total, window_end)`. The first step that does not
//! fit ends the pattern; later planned offsets are dropped, never retried.

use chrono::{DateTime, Duration, Utc};
use reacq_common::{Error, Result, SearchStep};

/// Step layout constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternTiming {
    /// Dwell time of each step
    pub step: Duration,
    /// Slew/settle gap between consecutive steps
    pub gap: Duration,
    /// Ceiling on the whole observation, measured from the window start
    pub max_total: Duration,
}

impl Default for PatternTiming {
    fn default() -> Self {
        Self {
            step: Duration::seconds(10),
            gap: Duration::seconds(10),
            max_total: Duration::minutes(4) + Duration::seconds(59),
        }
    }
}

impl PatternTiming {
    /// How many step+gap slots fit in `max_total`.
    pub fn slot_count(&self) -> usize {
        let slot = (self.step + self.gap).num_milliseconds();
        if slot <= 0 {
            return 0;
        }
        (self.max_total.num_milliseconds() / slot).max(0) as usize
    }
}

/// Search pattern shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchPattern {
    FlyingV,
    Raster,
    Spiral,
    Concentric,
    MoveAlongTrack,
    StayOnTarget,
    OneStep,
}

/// Largest along-track multiple (exclusive) visited by `movealongtrack`.
const ALONG_TRACK_LIMIT: i32 = 30;

const RASTER_ROWS: i32 = 10;

const SPIRAL_TURNS: i32 = 5;

impl SearchPattern {
    pub const ALL: [SearchPattern; 7] = [
        SearchPattern::FlyingV,
        SearchPattern::Raster,
        SearchPattern::Spiral,
        SearchPattern::Concentric,
        SearchPattern::MoveAlongTrack,
        SearchPattern::StayOnTarget,
        SearchPattern::OneStep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchPattern::FlyingV => "flyingv",
            SearchPattern::Raster => "raster",
            SearchPattern::Spiral => "spiral",
            SearchPattern::Concentric => "concentric",
            SearchPattern::MoveAlongTrack => "movealongtrack",
            SearchPattern::StayOnTarget => "stayontarget",
            SearchPattern::OneStep => "onestep",
        }
    }

    /// Planned `(along, cross)` offsets as multiples of the search offset.
    pub fn plan(&self, timing: &PatternTiming) -> Vec<(f64, f64)> {
        match self {
            SearchPattern::FlyingV => vec![(0.0, 0.0), (-1.0, 1.0), (2.0, 0.0), (-2.0, -1.0), (1.0, 1.0)],
            SearchPattern::Raster => (0..RASTER_ROWS)
                .flat_map(|i| {
                    let row = f64::from(i);
                    [(row, 1.0), (row, -1.0)]
                })
                .collect(),
            SearchPattern::Spiral => (1..=SPIRAL_TURNS)
                .map(|i| (f64::from(i), f64::from(i)))
                .collect(),
            SearchPattern::Concentric => [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]
                .iter()
                .zip(1_i32..)
                .map(|(&(along, cross), radius)| (along * f64::from(radius), cross * f64::from(radius)))
                .collect(),
            SearchPattern::MoveAlongTrack => (1..ALONG_TRACK_LIMIT)
                .flat_map(|j| [f64::from(j), -f64::from(j)])
                .map(|j| (j, 0.0))
                .collect(),
            SearchPattern::StayOnTarget => vec![(0.0, 0.0); timing.slot_count()],
            SearchPattern::OneStep => vec![(0.0, 0.0)],
        }
    }
}

impl std::fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SearchPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        SearchPattern::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| Error::InvalidPattern(s.to_string()))
    }
}

/// Lays steps out on the timeline and refuses the first one that does not fit.
struct StepCursor {
    timing: PatternTiming,
    current: DateTime<Utc>,
    observation_end: DateTime<Utc>,
    steps: Vec<SearchStep>,
}

impl StepCursor {
    fn new(timing: PatternTiming, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Self {
        Self {
            timing,
            current: window_start,
            observation_end: (window_start + timing.max_total).min(window_end),
            steps: Vec::new(),
        }
    }

    fn try_add_step(&mut self, along_track: f64, cross_track: f64) -> bool {
        let step_end = self.current + self.timing.step;
        if step_end > self.observation_end {
            return false;
        }

        self.steps.push(SearchStep {
            along_track_offset_meters: along_track,
            cross_track_offset_meters: cross_track,
            radial_offset_meters: 0.0,
            start_time: self.current,
            end_time: step_end,
        });
        self.current = step_end + self.timing.gap;
        true
    }
}

/// Generate timed steps for `pattern` with the default timing.
pub fn generate_steps(
    pattern: SearchPattern,
    offset_meters: f64,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<SearchStep> {
    generate_steps_with(pattern, &PatternTiming::default(), offset_meters, window_start, window_end)
}

/// Generate timed steps for `pattern` with explicit timing.
pub fn generate_steps_with(
    pattern: SearchPattern,
    timing: &PatternTiming,
    offset_meters: f64,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<SearchStep> {
    let mut cursor = StepCursor::new(*timing, window_start, window_end);

    for (along, cross) in pattern.plan(timing) {
        if !cursor.try_add_step(along * offset_meters, cross * offset_meters) {
            break;
        }
    }

    cursor.steps
}

/// Generate steps for a pattern given by its identifier.
///
/// Unknown identifiers fail with [`Error::InvalidPattern`] before any step is laid out.
pub fn generate_steps_for(
    kind: &str,
    offset_meters: f64,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<Vec<SearchStep>> {
    let pattern: SearchPattern = kind.parse()?;
    Ok(generate_steps(pattern, offset_meters, window_start, window_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap()
    }

    fn hour_window() -> (DateTime<Utc>, DateTime<Utc>) {
        (start(), start() + Duration::hours(1))
    }

    fn offsets(steps: &[SearchStep]) -> Vec<(f64, f64)> {
        steps
            .iter()
            .map(|s| (s.along_track_offset_meters, s.cross_track_offset_meters))
            .collect()
    }

    fn assert_timing(steps: &[SearchStep], window_start: DateTime<Utc>, window_end: DateTime<Utc>) {
        let observation_end = (window_start + PatternTiming::default().max_total).min(window_end);
        for step in steps {
            assert_eq!(step.end_time - step.start_time, Duration::seconds(10));
            assert!(step.start_time >= window_start);
            assert!(step.end_time <= observation_end);
            assert_eq!(step.radial_offset_meters, 0.0);
        }
        for pair in steps.windows(2) {
            assert_eq!(pair[1].start_time - pair[0].end_time, Duration::seconds(10));
        }
    }

    #[test]
    fn test_timing_invariants_for_every_pattern() {
        let windows = [
            hour_window(),
            (start(), start() + Duration::seconds(95)),
            (start(), start() + Duration::seconds(10)),
            (start(), start() + Duration::seconds(9)),
        ];
        for pattern in SearchPattern::ALL {
            for (window_start, window_end) in windows {
                let steps = generate_steps(pattern, 250.0, window_start, window_end);
                assert_timing(&steps, window_start, window_end);
            }
        }
    }

    #[test]
    fn test_onestep_on_hour_window() {
        let (ws, we) = hour_window();
        let steps = generate_steps(SearchPattern::OneStep, 500.0, ws, we);
        assert_eq!(steps.len(), 1);
        assert_eq!(offsets(&steps), vec![(0.0, 0.0)]);
        assert_eq!(steps[0].start_time, ws);
        assert_eq!(steps[0].end_time, ws + Duration::seconds(10));
    }

    #[test]
    fn test_onestep_needs_ten_seconds() {
        assert_eq!(generate_steps(SearchPattern::OneStep, 1.0, start(), start() + Duration::seconds(10)).len(), 1);
        assert!(generate_steps(SearchPattern::OneStep, 1.0, start(), start() + Duration::milliseconds(9_999)).is_empty());
    }

    #[test]
    fn test_flyingv_full_pattern() {
        let steps = generate_steps(SearchPattern::FlyingV, 1500.0, start(), start() + Duration::seconds(200));
        assert_eq!(
            offsets(&steps),
            vec![(0.0, 0.0), (-1500.0, 1500.0), (3000.0, 0.0), (-3000.0, -1500.0), (1500.0, 1500.0)]
        );
        assert_eq!(steps[4].end_time, start() + Duration::seconds(90));
    }

    #[test]
    fn test_flyingv_truncated_by_window() {
        // room for steps at 0s, 20s and 40s only
        let steps = generate_steps(SearchPattern::FlyingV, 100.0, start(), start() + Duration::seconds(55));
        assert_eq!(offsets(&steps), vec![(0.0, 0.0), (-100.0, 100.0), (200.0, 0.0)]);
    }

    #[test]
    fn test_raster_is_capped_by_max_duration() {
        let (ws, we) = hour_window();
        let steps = generate_steps(SearchPattern::Raster, 10.0, ws, we);
        // the 299s ceiling leaves room for 15 steps: rows 0..=6 and half of row 7
        assert_eq!(steps.len(), 15);
        assert_eq!(
            offsets(&steps[..4]),
            vec![(0.0, 10.0), (0.0, -10.0), (10.0, 10.0), (10.0, -10.0)]
        );
        assert_eq!(offsets(&steps).last(), Some(&(70.0, 10.0)));
        assert_eq!(steps[14].end_time, ws + Duration::seconds(290));
    }

    #[test]
    fn test_raster_stops_mid_row() {
        // three slots: row 0 complete, row 1 only its first half
        let steps = generate_steps(SearchPattern::Raster, 10.0, start(), start() + Duration::seconds(50));
        assert_eq!(offsets(&steps), vec![(0.0, 10.0), (0.0, -10.0), (10.0, 10.0)]);
    }

    #[test]
    fn test_spiral_and_concentric() {
        let (ws, we) = hour_window();
        let spiral = generate_steps(SearchPattern::Spiral, 2.0, ws, we);
        assert_eq!(offsets(&spiral), vec![(2.0, 2.0), (4.0, 4.0), (6.0, 6.0), (8.0, 8.0), (10.0, 10.0)]);

        let concentric = generate_steps(SearchPattern::Concentric, 2.0, ws, we);
        assert_eq!(offsets(&concentric), vec![(2.0, 0.0), (0.0, 4.0), (-6.0, 0.0), (0.0, -8.0)]);
    }

    #[test]
    fn test_movealongtrack_sequence() {
        let plan = SearchPattern::MoveAlongTrack.plan(&PatternTiming::default());
        let multiples: Vec<f64> = plan.iter().map(|(along, _)| *along).collect();
        assert_eq!(multiples.len(), 58);
        assert_eq!(&multiples[..6], &[1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
        assert_eq!(&multiples[56..], &[29.0, -29.0]);
        assert!(plan.iter().all(|(_, cross)| *cross == 0.0));

        let (ws, we) = hour_window();
        let steps = generate_steps(SearchPattern::MoveAlongTrack, 100.0, ws, we);
        assert_eq!(steps.len(), 15);
        assert_eq!(offsets(&steps).last(), Some(&(800.0, 0.0)));
    }

    #[test]
    fn test_movealongtrack_uncapped_visits_every_multiple() {
        let timing = PatternTiming {
            max_total: Duration::hours(1),
            ..PatternTiming::default()
        };
        let steps = generate_steps_with(SearchPattern::MoveAlongTrack, &timing, 1.0, start(), start() + Duration::hours(1));
        assert_eq!(steps.len(), 58);
        assert_eq!(steps.last().map(|s| s.along_track_offset_meters), Some(-29.0));
    }

    #[test]
    fn test_stayontarget_counts() {
        let (ws, we) = hour_window();
        assert_eq!(PatternTiming::default().slot_count(), 14);
        let steps = generate_steps(SearchPattern::StayOnTarget, 999.0, ws, we);
        assert_eq!(steps.len(), 14);
        assert!(steps.iter().all(|s| s.along_track_offset_meters == 0.0 && s.cross_track_offset_meters == 0.0));
        assert_eq!(steps[13].end_time, ws + Duration::seconds(270));

        let short = generate_steps(SearchPattern::StayOnTarget, 999.0, ws, ws + Duration::seconds(60));
        assert_eq!(short.len(), 3);
    }

    #[test]
    fn test_inverted_window_yields_nothing() {
        for pattern in SearchPattern::ALL {
            assert!(generate_steps(pattern, 1.0, start(), start() - Duration::minutes(1)).is_empty());
        }
    }

    #[test]
    fn test_pattern_identifiers() {
        for pattern in SearchPattern::ALL {
            assert_eq!(pattern.as_str().parse::<SearchPattern>().unwrap(), pattern);
        }
        assert_eq!(" FlyingV ".parse::<SearchPattern>().unwrap(), SearchPattern::FlyingV);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let (ws, we) = hour_window();
        match generate_steps_for("zigzag", 100.0, ws, we) {
            Err(Error::InvalidPattern(kind)) => assert_eq!(kind, "zigzag"),
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
        assert_eq!(generate_steps_for("onestep", 100.0, ws, we).unwrap().len(), 1);
    }
}
