use reacq_scheduler::api::ApiClient;
use reacq_scheduler::config::SchedulerConfig;
use reacq_scheduler::coordinator::{CoordinatorOptions, ScheduleCoordinator};
use reacq_scheduler::operator::{ConsolePrompt, SearchPlan, Unattended};

use anyhow::{Context, Result};
use chrono::Utc;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = SchedulerConfig::from_file(&config_path)?;

    // Initialize logging
    let _logging_guard = reacq_scheduler::logging::init_logging(
        &config.log_dir,
        "reacq-scheduler",
        &config.log_level,
    )
    .context("Failed to initialize logging")?;

    tracing::info!("Re-acquisition scheduler starting (config: {})", config_path);
    if config.api_token.is_empty() && !config.dry_run {
        tracing::warn!("No API token configured; requests will be unauthenticated");
    }

    let api = ApiClient::new(&config)?;
    let options = CoordinatorOptions::from_config(&config);
    let observation_time = Utc::now();

    let report = if config.interactive {
        ScheduleCoordinator::new(&api, ConsolePrompt::stdio(), options)
            .run(observation_time)
            .await
    } else {
        let plan = SearchPlan {
            pattern: config.search_pattern()?,
            tracking_type: config.tracking_type,
        };
        ScheduleCoordinator::new(&api, Unattended::new(plan), options)
            .run(observation_time)
            .await
    };

    println!("{}", report);

    Ok(())
}
