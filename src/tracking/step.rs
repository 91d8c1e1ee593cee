//! The "Feedback" screen: the tracking module's [`ViewStep`] implementation.

use crate::job::JobList;
use crate::named_enum::{tracking_names, TrackingType};
use crate::tracking::config::TrackingConfig;
use crate::tracking::jobs::{InstallTrackingJob, MachineTrackingJob};
use crate::tracking::page::TrackingPage;
use crate::viewstep::{ConfigMap, ViewStep};

/// Thin adapter between the host's step sequencer and the tracking
/// configuration and page models. Imposes no navigational constraints on
/// the host; its one real responsibility is building the job list when the
/// user leaves the screen.
pub struct TrackingViewStep {
    config: TrackingConfig,
    page: TrackingPage,
}

impl Default for TrackingViewStep {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingViewStep {
    pub fn new() -> Self {
        Self {
            config: TrackingConfig::new(),
            page: TrackingPage::new(),
        }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// The display surface. The host ABI's widget accessor is toolkit
    /// specific; standalone callers get the view model directly.
    pub fn page(&self) -> &TrackingPage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut TrackingPage {
        &mut self.page
    }

    /// Apply a consent level as if the user had selected it on screen.
    pub fn select_level(&mut self, level: TrackingType) {
        self.page.set_tracking_level(level);
        self.config.apply_level(level);
    }
}

impl ViewStep for TrackingViewStep {
    fn pretty_name(&self) -> String {
        "Feedback".to_string()
    }

    fn is_next_enabled(&self) -> bool {
        true
    }

    fn is_back_enabled(&self) -> bool {
        true
    }

    fn is_at_beginning(&self) -> bool {
        true
    }

    fn is_at_end(&self) -> bool {
        true
    }

    fn on_leave(&mut self) {
        tracing::debug!(
            install = self.config.install_tracking().is_enabled(),
            machine = self.config.machine_tracking().is_enabled(),
            user = self.config.user_tracking().is_enabled(),
            "Leaving tracking step"
        );
    }

    fn jobs(&self) -> JobList {
        tracing::debug!("Creating tracking jobs");

        let mut list = JobList::new();
        InstallTrackingJob::add_job(&mut list, self.config.install_tracking());
        MachineTrackingJob::add_job(&mut list, self.config.machine_tracking());
        // User tracking consent is recorded elsewhere in the product and
        // enqueues no job here.
        list
    }

    fn set_configuration_map(&mut self, map: &ConfigMap) {
        self.config.set_configuration_map(map);

        // The optional "default" key pre-selects a consent level. An
        // unknown token warns and leaves the page's built-in default; a
        // missing key is silently skipped.
        if let Some(value) = map.get("default") {
            let token = value.as_str().unwrap_or_default();
            match tracking_names().find(token) {
                Some(level) => self.select_level(level),
                None => {
                    tracing::warn!(value = %token, "Default tracking level unknown");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Job;

    fn step_from(yaml: &str) -> TrackingViewStep {
        let map: ConfigMap = serde_yaml::from_str(yaml).unwrap();
        let mut step = TrackingViewStep::new();
        step.set_configuration_map(&map);
        step
    }

    const FULL_CONFIG: &str = r#"
install:
  enabled: true
  url: "https://example.com/ping?c=$CPU"
machine:
  enabled: true
  style: "meta-release"
  uri: "https://example.com/meta-release"
user:
  enabled: true
"#;

    #[test]
    fn test_step_imposes_no_navigation_constraints() {
        let step = TrackingViewStep::new();
        assert!(step.is_next_enabled());
        assert!(step.is_back_enabled());
        assert!(step.is_at_beginning());
        assert!(step.is_at_end());
        assert_eq!(step.pretty_name(), "Feedback");
    }

    #[test]
    fn test_default_key_selects_initial_level() {
        let step = step_from("default: \"machine\"\n");
        assert_eq!(step.page().tracking_level(), TrackingType::MachineTracking);
        assert_eq!(
            step.config().tracking_level(),
            Some(TrackingType::MachineTracking)
        );
    }

    #[test]
    fn test_unknown_default_keeps_builtin_default() {
        let step = step_from("default: \"bogus\"\n");
        assert_eq!(step.page().tracking_level(), TrackingType::NoTracking);
    }

    #[test]
    fn test_missing_default_keeps_builtin_default() {
        let step = step_from("install:\n  enabled: true\n");
        assert_eq!(step.page().tracking_level(), TrackingType::NoTracking);
    }

    #[test]
    fn test_install_only_produces_one_job_first() {
        let mut step = step_from(FULL_CONFIG);
        step.select_level(TrackingType::InstallTracking);
        let jobs = step.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].pretty_name(), "Install tracking");
    }

    #[test]
    fn test_all_three_enabled_produce_install_then_machine() {
        let mut step = step_from(FULL_CONFIG);
        step.select_level(TrackingType::UserTracking);
        let jobs = step.jobs();
        // User tracking alone never produces a job entry
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].pretty_name(), "Install tracking");
        assert_eq!(jobs[1].pretty_name(), "Machine tracking");
    }

    #[test]
    fn test_no_tracking_produces_no_jobs() {
        let step = step_from(FULL_CONFIG);
        assert!(step.jobs().is_empty());
    }

    #[test]
    fn test_on_leave_mutates_nothing() {
        let mut step = step_from(FULL_CONFIG);
        step.select_level(TrackingType::MachineTracking);
        step.on_leave();
        assert_eq!(step.page().tracking_level(), TrackingType::MachineTracking);
        assert_eq!(step.jobs().len(), 2);
    }
}
