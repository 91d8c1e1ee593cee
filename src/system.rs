//! Hardware facts used for install-ping placeholder substitution.

use sysinfo::{Disks, System};

/// A snapshot of the facts the install tracking URL may reference.
///
/// Probed once when the job is built; injectable so tests never depend on
/// the machine they run on.
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    /// CPU brand string, whitespace-trimmed.
    pub cpu: String,
    /// Total physical memory in bytes.
    pub memory_bytes: u64,
    /// Total disk capacity across all disks, in bytes.
    pub disk_bytes: u64,
}

impl SystemSnapshot {
    /// Probe the running machine.
    pub fn probe() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let cpu = sys
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .unwrap_or_default();

        let disks = Disks::new_with_refreshed_list();
        let disk_bytes = disks.iter().map(sysinfo::Disk::total_space).sum();

        Self {
            cpu,
            memory_bytes: sys.total_memory(),
            disk_bytes,
        }
    }
}
