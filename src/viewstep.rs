//! The view-step contract a host wizard drives screens through.
//!
//! The host's step sequencer treats every screen uniformly: it queries
//! navigation enablement, forwards enter/leave events, hands each step its
//! slice of the module configuration, and collects the jobs the step wants
//! executed. The trait stands in for that host ABI so a step can be built
//! and tested standalone.

use crate::job::JobList;

/// String-keyed configuration mapping, as decoded by the host from the
/// module's declarative configuration file.
pub type ConfigMap = serde_yaml::Mapping;

pub trait ViewStep {
    /// User-visible name of the screen.
    fn pretty_name(&self) -> String;

    /// Whether the host may enable its "next" control on this screen.
    fn is_next_enabled(&self) -> bool;

    /// Whether the host may enable its "back" control on this screen.
    fn is_back_enabled(&self) -> bool;

    /// Whether this step is the first screen of its sequence.
    fn is_at_beginning(&self) -> bool;

    /// Whether this step is the last screen of its sequence.
    fn is_at_end(&self) -> bool;

    /// Called when the host navigates onto this screen.
    fn on_enter(&mut self) {}

    /// Called when the user leaves this screen, before jobs are collected.
    fn on_leave(&mut self) {}

    /// Produce the ordered list of jobs this step wants the host to run.
    fn jobs(&self) -> JobList;

    /// Hand the step its configuration mapping. Decode problems are
    /// advisory: the step logs and degrades, it never aborts loading.
    fn set_configuration_map(&mut self, map: &ConfigMap);
}
