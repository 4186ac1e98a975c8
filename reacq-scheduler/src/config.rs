use anyhow::Context;
use reacq_common::TrackingType;
use serde::{Deserialize, Serialize};

use crate::model::SearchPattern;

/// Environment variable consulted when the config file carries no token.
pub const API_TOKEN_ENV: &str = "REACQ_API_TOKEN";

/// Upper bound on `lookahead_days`.
pub const MAX_LOOKAHEAD_DAYS: i64 = 366;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Base URL of the scheduling service, without a trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default)]
    pub api_token: String,

    /// Satellite targets to schedule, processed in order
    #[serde(default)]
    pub target_ids: Vec<String>,

    /// How far ahead to look for potential windows
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: i64,

    /// Search pattern used when running unattended
    #[serde(default = "default_pattern")]
    pub pattern: String,

    #[serde(default)]
    pub tracking_type: TrackingType,

    /// Ask on the console before scheduling each target
    #[serde(default)]
    pub interactive: bool,

    /// Build and log the schedules without submitting them
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_api_base_url() -> String {
    "https://api.prod.oursky.ai/v1".to_string()
}

fn default_lookahead_days() -> i64 {
    1
}

fn default_pattern() -> String {
    SearchPattern::FlyingV.as_str().to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_token: String::new(),
            target_ids: Vec::new(),
            lookahead_days: default_lookahead_days(),
            pattern: default_pattern(),
            tracking_type: TrackingType::default(),
            interactive: false,
            dry_run: false,
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path))?;

        if config.api_token.is_empty() {
            if let Ok(token) = std::env::var(API_TOKEN_ENV) {
                config.api_token = token;
            }
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: SchedulerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.search_pattern()?;
        if !(0..=MAX_LOOKAHEAD_DAYS).contains(&self.lookahead_days) {
            anyhow::bail!(
                "lookahead_days must be between 0 and {} (got {})",
                MAX_LOOKAHEAD_DAYS,
                self.lookahead_days
            );
        }
        if self.api_base_url.trim().is_empty() {
            anyhow::bail!("api_base_url must not be empty");
        }
        Ok(())
    }

    /// The configured default search pattern.
    pub fn search_pattern(&self) -> reacq_common::Result<SearchPattern> {
        self.pattern.parse()
    }

    /// Lookahead span, clamped to `0..=MAX_LOOKAHEAD_DAYS` for configs built in code.
    pub fn lookahead(&self) -> chrono::Duration {
        chrono::Duration::days(self.lookahead_days.clamp(0, MAX_LOOKAHEAD_DAYS))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}
