//! Static string-to-enum lookup tables for configuration decoding.
//!
//! A [`NamedEnumTable`] is an ordered, immutable mapping between the tokens
//! that appear in module configuration files and a closed enum. Tables are
//! module-level constants, shared read-only for the process lifetime, and
//! exposed only through pure lookup functions. A failed lookup is a normal
//! outcome the caller branches on, never a fatal condition.

/// Consent classification governing what telemetry the installer or the
/// installed system reports.
///
/// The ordering is the cumulative consent order: each level implies consent
/// to everything below it (`none < install < machine < user`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackingType {
    NoTracking,
    InstallTracking,
    MachineTracking,
    UserTracking,
}

/// Known mechanisms for machine tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineTrackingStyle {
    /// Rewrite the update-manager meta-release URIs on the target system.
    MetaRelease,
}

/// An ordered, immutable mapping between configuration tokens and enum
/// values. Tokens are unique within a table; lookup is by exact,
/// case-sensitive match.
pub struct NamedEnumTable<T: 'static> {
    entries: &'static [(&'static str, T)],
}

impl<T: Copy + PartialEq> NamedEnumTable<T> {
    /// Wrap a static entry list. The list is configuration data: fixed at
    /// construction, never mutated afterward.
    pub const fn new(entries: &'static [(&'static str, T)]) -> Self {
        Self { entries }
    }

    /// Look up `token` against the table entries. Returns `None` on a miss;
    /// a miss is advisory, the caller decides whether to warn or fall back.
    pub fn find(&self, token: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, value)| *value)
    }

    /// Canonical token for `value`, the encode direction of the table.
    pub fn name_of(&self, value: T) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| *name)
    }

    /// Registered tokens, in table order.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Table of tracking level tokens as they appear in module configuration.
pub fn tracking_names() -> &'static NamedEnumTable<TrackingType> {
    static NAMES: NamedEnumTable<TrackingType> = NamedEnumTable::new(&[
        ("none", TrackingType::NoTracking),
        ("install", TrackingType::InstallTracking),
        ("machine", TrackingType::MachineTracking),
        ("user", TrackingType::UserTracking),
    ]);
    &NAMES
}

/// Table of valid machine-tracking style tokens.
pub fn machine_style_names() -> &'static NamedEnumTable<MachineTrackingStyle> {
    static NAMES: NamedEnumTable<MachineTrackingStyle> =
        NamedEnumTable::new(&[("meta-release", MachineTrackingStyle::MetaRelease)]);
    &NAMES
}
