//! Decoding of the tracking step's configuration mapping.
//!
//! The host hands the step a string-keyed mapping; this module turns it
//! into per-category sub-configurations. Every decode problem is advisory:
//! an undecodable mapping keeps the defaults (all categories unavailable),
//! an unknown machine style makes machine tracking unavailable. Nothing
//! here aborts configuration loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::named_enum::{machine_style_names, MachineTrackingStyle, TrackingType};
use crate::viewstep::ConfigMap;

/// Raw on-disk shape of the tracking module configuration. Tolerant by
/// construction: every section and field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    general: RawGeneral,
    install: RawInstall,
    machine: RawMachine,
    user: RawUser,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGeneral {
    policy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawInstall {
    enabled: bool,
    policy: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMachine {
    enabled: bool,
    policy: Option<String>,
    style: Option<String>,
    uri: Option<String>,
    root: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUser {
    enabled: bool,
    policy: Option<String>,
}

/// Install-tracking consent: a one-shot ping when installation finishes.
#[derive(Debug, Clone, Default)]
pub struct InstallTrackingConfig {
    available: bool,
    chosen: bool,
    policy: Option<String>,
    url: Option<String>,
}

impl InstallTrackingConfig {
    /// The flag the adapter reads: offered by the distribution and chosen
    /// by the user.
    pub fn is_enabled(&self) -> bool {
        self.available && self.chosen
    }

    /// Whether the distribution offers this category at all.
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn policy(&self) -> Option<&str> {
        self.policy.as_deref()
    }

    /// Tracking URL template, with `$CPU`/`$MEMORY`/`$DISK` placeholders.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Machine-tracking consent: the installed machine reports in when it
/// checks for updates.
#[derive(Debug, Clone)]
pub struct MachineTrackingConfig {
    available: bool,
    chosen: bool,
    policy: Option<String>,
    style: Option<MachineTrackingStyle>,
    uri: Option<String>,
    root: PathBuf,
}

impl Default for MachineTrackingConfig {
    fn default() -> Self {
        Self {
            available: false,
            chosen: false,
            policy: None,
            style: None,
            uri: None,
            root: PathBuf::from("/"),
        }
    }
}

impl MachineTrackingConfig {
    pub fn is_enabled(&self) -> bool {
        self.available && self.chosen
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn policy(&self) -> Option<&str> {
        self.policy.as_deref()
    }

    /// Validated tracking style; `None` only when the category is
    /// unavailable.
    pub fn style(&self) -> Option<MachineTrackingStyle> {
        self.style
    }

    /// Endpoint URI the target system should report to.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Root the target filesystem is mounted under.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// User-tracking consent: the installed system reports on its usage. Read
/// and logged by the step, but it enqueues no job of its own.
#[derive(Debug, Clone, Default)]
pub struct UserTrackingConfig {
    available: bool,
    chosen: bool,
    policy: Option<String>,
}

impl UserTrackingConfig {
    pub fn is_enabled(&self) -> bool {
        self.available && self.chosen
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn policy(&self) -> Option<&str> {
        self.policy.as_deref()
    }
}

/// The tracking step's decoded configuration: one sub-configuration per
/// category plus the overall policy link and the current consent level.
#[derive(Debug, Clone, Default)]
pub struct TrackingConfig {
    general_policy: Option<String>,
    install: InstallTrackingConfig,
    machine: MachineTrackingConfig,
    user: UserTrackingConfig,
    level: Option<TrackingType>,
}

impl TrackingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the host-supplied configuration mapping. A mapping that does
    /// not decode logs a warning and leaves the defaults in place.
    pub fn set_configuration_map(&mut self, map: &ConfigMap) {
        let raw: RawConfig =
            match serde_yaml::from_value(serde_yaml::Value::Mapping(map.clone())) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(error = %e, "Tracking configuration does not decode, keeping defaults");
                    return;
                }
            };

        self.general_policy = raw.general.policy;

        self.install = InstallTrackingConfig {
            available: raw.install.enabled,
            chosen: self.install.chosen,
            policy: raw.install.policy,
            url: raw.install.url,
        };

        let style = Self::validate_style(raw.machine.enabled, raw.machine.style.as_deref());
        self.machine = MachineTrackingConfig {
            available: raw.machine.enabled && style.is_some(),
            chosen: self.machine.chosen,
            policy: raw.machine.policy,
            style,
            uri: raw.machine.uri,
            root: raw.machine.root.unwrap_or_else(|| PathBuf::from("/")),
        };

        self.user = UserTrackingConfig {
            available: raw.user.enabled,
            chosen: self.user.chosen,
            policy: raw.user.policy,
        };
    }

    /// Resolve the machine-tracking style token. An enabled category with
    /// a missing or unknown style is a logged, non-fatal problem that makes
    /// the category unavailable.
    fn validate_style(enabled: bool, token: Option<&str>) -> Option<MachineTrackingStyle> {
        if !enabled {
            return None;
        }
        match token {
            Some(token) => {
                let style = machine_style_names().find(token);
                if style.is_none() {
                    tracing::warn!(style = %token, "Unknown machine tracking style, disabling machine tracking");
                }
                style
            }
            None => {
                tracing::warn!("Machine tracking enabled without a style, disabling machine tracking");
                None
            }
        }
    }

    /// Apply a cumulative consent level: a level chooses every category at
    /// or below it. Availability still gates `is_enabled()`.
    pub fn apply_level(&mut self, level: TrackingType) {
        self.install.chosen = level >= TrackingType::InstallTracking;
        self.machine.chosen = level >= TrackingType::MachineTracking;
        self.user.chosen = level >= TrackingType::UserTracking;
        self.level = Some(level);
    }

    /// The consent level most recently applied, if any.
    pub fn tracking_level(&self) -> Option<TrackingType> {
        self.level
    }

    pub fn general_policy(&self) -> Option<&str> {
        self.general_policy.as_deref()
    }

    pub fn install_tracking(&self) -> &InstallTrackingConfig {
        &self.install
    }

    pub fn machine_tracking(&self) -> &MachineTrackingConfig {
        &self.machine
    }

    pub fn user_tracking(&self) -> &UserTrackingConfig {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from(yaml: &str) -> ConfigMap {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn full_config() -> TrackingConfig {
        let mut config = TrackingConfig::new();
        config.set_configuration_map(&map_from(
            r#"
general:
  policy: "https://example.com/tracking-policy"
install:
  enabled: true
  url: "https://example.com/ping?c=$CPU&m=$MEMORY&d=$DISK"
machine:
  enabled: true
  style: "meta-release"
  uri: "https://example.com/meta-release"
user:
  enabled: true
"#,
        ));
        config
    }

    #[test]
    fn test_categories_default_to_unavailable() {
        let config = TrackingConfig::new();
        assert!(!config.install_tracking().is_enabled());
        assert!(!config.machine_tracking().is_enabled());
        assert!(!config.user_tracking().is_enabled());
    }

    #[test]
    fn test_level_user_chooses_all_three_categories() {
        let mut config = full_config();
        config.apply_level(TrackingType::UserTracking);
        assert!(config.install_tracking().is_enabled());
        assert!(config.machine_tracking().is_enabled());
        assert!(config.user_tracking().is_enabled());
    }

    #[test]
    fn test_level_install_chooses_only_install() {
        let mut config = full_config();
        config.apply_level(TrackingType::InstallTracking);
        assert!(config.install_tracking().is_enabled());
        assert!(!config.machine_tracking().is_enabled());
        assert!(!config.user_tracking().is_enabled());
    }

    #[test]
    fn test_level_none_chooses_nothing() {
        let mut config = full_config();
        config.apply_level(TrackingType::UserTracking);
        config.apply_level(TrackingType::NoTracking);
        assert!(!config.install_tracking().is_enabled());
        assert!(!config.machine_tracking().is_enabled());
        assert!(!config.user_tracking().is_enabled());
    }

    #[test]
    fn test_availability_still_gates_enablement() {
        let mut config = TrackingConfig::new();
        config.set_configuration_map(&map_from(
            r#"
install:
  enabled: false
user:
  enabled: true
"#,
        ));
        config.apply_level(TrackingType::UserTracking);
        assert!(!config.install_tracking().is_enabled());
        assert!(config.user_tracking().is_enabled());
    }

    #[test]
    fn test_unknown_machine_style_disables_machine_tracking() {
        let mut config = TrackingConfig::new();
        config.set_configuration_map(&map_from(
            r#"
machine:
  enabled: true
  style: "carrier-pigeon"
  uri: "https://example.com/meta-release"
"#,
        ));
        config.apply_level(TrackingType::UserTracking);
        assert!(!config.machine_tracking().is_enabled());
        assert_eq!(config.machine_tracking().style(), None);
    }

    #[test]
    fn test_missing_machine_style_disables_machine_tracking() {
        let mut config = TrackingConfig::new();
        config.set_configuration_map(&map_from("machine:\n  enabled: true\n"));
        config.apply_level(TrackingType::MachineTracking);
        assert!(!config.machine_tracking().is_enabled());
    }

    #[test]
    fn test_undecodable_map_keeps_defaults() {
        let mut config = TrackingConfig::new();
        config.set_configuration_map(&map_from("install: \"not a mapping\"\n"));
        assert!(!config.install_tracking().is_enabled());
        assert_eq!(config.install_tracking().url(), None);
    }

    #[test]
    fn test_machine_root_defaults_to_slash() {
        let config = full_config();
        assert_eq!(config.machine_tracking().root(), Path::new("/"));
    }

    #[test]
    fn test_policy_links_decode() {
        let config = full_config();
        assert_eq!(
            config.general_policy(),
            Some("https://example.com/tracking-policy")
        );
    }
}
