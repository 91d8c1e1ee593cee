//! Feedback/tracking consent step for step-driven installers.
//!
//! The crate models one installer screen: it decodes the tracking module's
//! configuration, tracks the user's consent level, and on leaving the
//! screen produces the jobs that encode that consent into the rest of the
//! installation. The host framework (step sequencer, job queue, widget
//! toolkit) is external; the [`viewstep`] and [`job`] traits stand in for
//! its contracts so the step runs standalone.

pub mod job;
pub mod logging;
pub mod named_enum;
pub mod system;
pub mod tracking;
pub mod viewstep;

pub use job::{Job, JobError, JobList};
pub use named_enum::{
    machine_style_names, tracking_names, MachineTrackingStyle, NamedEnumTable, TrackingType,
};
pub use system::SystemSnapshot;
pub use tracking::{TrackingConfig, TrackingPage, TrackingViewStep};
pub use viewstep::{ConfigMap, ViewStep};
