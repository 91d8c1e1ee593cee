//! The feedback/tracking consent step.
//!
//! `config` decodes the host-supplied configuration mapping into the three
//! per-category consent sub-configurations, `page` is the GUI-free display
//! surface, `jobs` holds the concrete work the step enqueues, and `step`
//! is the adapter conforming to the host's [`ViewStep`](crate::viewstep::ViewStep)
//! contract.

pub mod config;
pub mod jobs;
pub mod page;
pub mod step;

pub use config::TrackingConfig;
pub use jobs::{InstallTrackingJob, MachineTrackingJob};
pub use page::TrackingPage;
pub use step::TrackingViewStep;
