//! The job contract this module produces work against.
//!
//! In a real installer the job queue and its execution policy belong to the
//! host framework; the trait here is the seam the host would provide. The
//! module only builds the ordered list, it never executes, retries, or
//! sequences jobs itself.

use std::path::PathBuf;

use thiserror::Error;

/// Errors a tracking job can report when run.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("tracking request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("tracking endpoint '{url}' returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("machine tracking is enabled but no endpoint URI is configured")]
    MissingUri,

    #[error("failed to update '{path}': {source}")]
    TargetFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A unit of deferred work, parameterized at creation time with everything
/// it needs. The host decides when (and whether) to run it.
pub trait Job: Send + Sync {
    /// Short human-readable description for progress reporting.
    fn pretty_name(&self) -> String;

    /// Perform the work. A failure is an ordinary result the host maps onto
    /// its own policy; jobs never panic or retry internally.
    fn run(&self) -> Result<(), JobError>;
}

/// Ordered list of jobs handed back to the host.
pub type JobList = Vec<Box<dyn Job>>;
