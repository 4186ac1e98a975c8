//! Operator gate
//!
//! Before any window is fetched for a target, an [`Operator`] sees the search
//! summary and decides whether (and how) to schedule it.

use std::io::{BufRead, Write};

use reacq_common::{OrbitClass, Result, TrackingType};

use crate::model::SearchPattern;

/// What the coordinator computed for a target, shown before scheduling.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSummary {
    pub target_id: String,
    pub orbit_class: OrbitClass,
    /// Orbit label as reported by the service, if any
    pub orbit_label: Option<String>,
    pub age_days: f64,
    pub radial_error_meters: f64,
    pub search_offset_meters: f64,
}

impl std::fmt::Display for TargetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "TLE age for target {}: {:.2} days, orbit type: {}",
            self.target_id,
            self.age_days,
            self.orbit_label.as_deref().unwrap_or(self.orbit_class.as_str())
        )?;
        write!(
            f,
            "Along-track & Cross-track Offset = {:.2} meters, Radial Offset = {:.2} meters",
            self.search_offset_meters, self.radial_error_meters
        )
    }
}

/// How to search for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPlan {
    pub pattern: SearchPattern,
    pub tracking_type: TrackingType,
}

pub trait Operator {
    /// `Ok(None)` skips the target.
    fn review(&mut self, summary: &TargetSummary) -> Result<Option<SearchPlan>>;
}

/// Accepts every target with a fixed plan.
#[derive(Debug, Clone, Copy)]
pub struct Unattended {
    plan: SearchPlan,
}

impl Unattended {
    pub fn new(plan: SearchPlan) -> Self {
        Self { plan }
    }
}

impl Operator for Unattended {
    fn review(&mut self, _summary: &TargetSummary) -> Result<Option<SearchPlan>> {
        Ok(Some(self.plan))
    }
}

/// Menu offered by the console prompt. `movealongtrack` is accepted but not advertised.
const PATTERN_MENU: &str = "flyingv, raster, spiral, concentric, stayontarget, onestep";

/// Asks on a line-oriented console (stdin/stdout in production).
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn try_ask(&mut self, question: &str) -> std::io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_lowercase())
    }

    /// A closed or broken console reads as an empty answer.
    fn ask(&mut self, question: &str) -> String {
        self.try_ask(question).unwrap_or_else(|e| {
            tracing::warn!("Console prompt failed: {}", e);
            String::new()
        })
    }
}

impl<R: BufRead, W: Write> Operator for ConsolePrompt<R, W> {
    fn review(&mut self, summary: &TargetSummary) -> Result<Option<SearchPlan>> {
        // Summary write failures are not fatal; the questions below still decide.
        let _ = writeln!(self.output, "\n{}", summary);

        if self.ask("Confirm creating search instructions (y/n):") != "y" {
            return Ok(None);
        }

        let tracking_type = if self.ask("Sidereal or rate tracked (s/r):") == "s" {
            TrackingType::Sidereal
        } else {
            TrackingType::TargetRate
        };

        let pattern: SearchPattern = self
            .ask(&format!("Enter search instruction type ({}):", PATTERN_MENU))
            .parse()?;

        Ok(Some(SearchPlan { pattern, tracking_type }))
    }
}
