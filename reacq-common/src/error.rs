//! Error types shared by the scheduler core and its collaborators.

use thiserror::Error;

/// Result type alias for scheduler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or submitting a search schedule.
#[derive(Debug, Error)]
pub enum Error {
    /// Target metadata could not be fetched.
    #[error("failed to fetch metadata for target {target_id}: {message}")]
    MetadataFetchFailed {
        /// Target whose metadata was requested.
        target_id: String,
        /// Description of the failure.
        message: String,
    },

    /// Potential observation windows could not be fetched or decoded.
    #[error("failed to fetch potential windows for target {target_id}: {message}")]
    PotentialsFetchFailed {
        /// Target whose windows were requested.
        target_id: String,
        /// Description of the failure.
        message: String,
    },

    /// Unknown search pattern identifier.
    #[error("invalid search pattern '{0}'")]
    InvalidPattern(String),

    /// The scheduling service rejected or did not accept a schedule.
    #[error("failed to submit schedule for target {target_id}: {message}")]
    ScheduleSubmissionFailed {
        /// Target the schedule was built for.
        target_id: String,
        /// Description of the failure.
        message: String,
    },

    /// A timestamp matched none of the accepted formats.
    #[error("unrecognised timestamp '{0}'")]
    TimestampParseFailed(String),
}
