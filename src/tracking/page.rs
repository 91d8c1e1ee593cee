//! The display surface of the tracking step, toolkit-free.
//!
//! Holds the ordered set of consent levels the screen offers and the
//! current selection. The host's widget layer would bind radio buttons to
//! this model; here it is a plain value type so the step can be driven in
//! tests and from the harness binary.

use crate::named_enum::TrackingType;
use crate::tracking::config::TrackingConfig;

/// View model for the consent screen. The built-in default selection is
/// "no tracking"; configuration may move it, user interaction may move it
/// again.
#[derive(Debug, Clone)]
pub struct TrackingPage {
    level: TrackingType,
}

impl Default for TrackingPage {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingPage {
    pub fn new() -> Self {
        Self {
            level: TrackingType::NoTracking,
        }
    }

    /// Currently selected consent level.
    pub fn tracking_level(&self) -> TrackingType {
        self.level
    }

    pub fn set_tracking_level(&mut self, level: TrackingType) {
        self.level = level;
    }

    /// The levels this screen offers, in cumulative order. "No tracking"
    /// is always offered; each other level only when its category is
    /// available in the configuration.
    pub fn offered_levels(config: &TrackingConfig) -> Vec<TrackingType> {
        let mut levels = vec![TrackingType::NoTracking];
        if config.install_tracking().is_available() {
            levels.push(TrackingType::InstallTracking);
        }
        if config.machine_tracking().is_available() {
            levels.push(TrackingType::MachineTracking);
        }
        if config.user_tracking().is_available() {
            levels.push(TrackingType::UserTracking);
        }
        levels
    }

    /// Short user-facing label for a level.
    pub fn label(level: TrackingType) -> &'static str {
        match level {
            TrackingType::NoTracking => "None",
            TrackingType::InstallTracking => "Install",
            TrackingType::MachineTracking => "Machine",
            TrackingType::UserTracking => "User",
        }
    }

    /// User-facing description of what consenting to a level means.
    pub fn description(level: TrackingType) -> &'static str {
        match level {
            TrackingType::NoTracking => "No tracking is done; no information is sent anywhere.",
            TrackingType::InstallTracking => {
                "Sends one ping with hardware information when the installation finishes."
            }
            TrackingType::MachineTracking => {
                "The installed machine reports in when it checks for updates."
            }
            TrackingType::UserTracking => "The installed system regularly reports on its usage.",
        }
    }

    /// Policy link shown next to a level: the category's own policy when
    /// set, the general policy otherwise.
    pub fn policy_link<'a>(level: TrackingType, config: &'a TrackingConfig) -> Option<&'a str> {
        let category = match level {
            TrackingType::NoTracking => None,
            TrackingType::InstallTracking => config.install_tracking().policy(),
            TrackingType::MachineTracking => config.machine_tracking().policy(),
            TrackingType::UserTracking => config.user_tracking().policy(),
        };
        category.or_else(|| config.general_policy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewstep::ConfigMap;

    fn config_from(yaml: &str) -> TrackingConfig {
        let map: ConfigMap = serde_yaml::from_str(yaml).unwrap();
        let mut config = TrackingConfig::new();
        config.set_configuration_map(&map);
        config
    }

    #[test]
    fn test_default_selection_is_no_tracking() {
        let page = TrackingPage::new();
        assert_eq!(page.tracking_level(), TrackingType::NoTracking);
    }

    #[test]
    fn test_none_is_always_offered() {
        let config = TrackingConfig::new();
        assert_eq!(
            TrackingPage::offered_levels(&config),
            vec![TrackingType::NoTracking]
        );
    }

    #[test]
    fn test_offered_levels_follow_availability() {
        let config = config_from(
            r#"
install:
  enabled: true
user:
  enabled: true
"#,
        );
        assert_eq!(
            TrackingPage::offered_levels(&config),
            vec![
                TrackingType::NoTracking,
                TrackingType::InstallTracking,
                TrackingType::UserTracking,
            ]
        );
    }

    #[test]
    fn test_policy_link_falls_back_to_general() {
        let config = config_from(
            r#"
general:
  policy: "https://example.com/policy"
install:
  enabled: true
  policy: "https://example.com/install-policy"
user:
  enabled: true
"#,
        );
        assert_eq!(
            TrackingPage::policy_link(TrackingType::InstallTracking, &config),
            Some("https://example.com/install-policy")
        );
        assert_eq!(
            TrackingPage::policy_link(TrackingType::UserTracking, &config),
            Some("https://example.com/policy")
        );
    }
}
