//! The concrete jobs the tracking step enqueues.
//!
//! Install tracking is a one-shot HTTP GET against a configured URL with
//! hardware placeholders substituted at construction time. Machine
//! tracking rewrites the update-manager meta-release URIs on the target
//! system so it reports in on update checks. There is no user-tracking
//! job: that consent is read and logged by the step but recorded elsewhere
//! in the product.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::job::{Job, JobError, JobList};
use crate::named_enum::MachineTrackingStyle;
use crate::system::SystemSnapshot;
use crate::tracking::config::{InstallTrackingConfig, MachineTrackingConfig};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One-shot install ping. The URL is fully resolved when the job is built;
/// running it is a plain blocking GET.
pub struct InstallTrackingJob {
    url: String,
}

impl InstallTrackingJob {
    /// Build a job from a URL template, substituting the `$CPU`, `$MEMORY`
    /// and `$DISK` placeholders from `snapshot`. URLs without placeholders
    /// pass through unchanged.
    pub fn new(url_template: &str, snapshot: &SystemSnapshot) -> Self {
        let url = url_template
            .replace("$CPU", &snapshot.cpu.replace(' ', "+"))
            .replace("$MEMORY", &snapshot.memory_bytes.to_string())
            .replace("$DISK", &snapshot.disk_bytes.to_string());
        Self { url }
    }

    /// Append an install-tracking job to `list` when the category is
    /// enabled. An enabled category without a configured URL is a logged,
    /// non-fatal configuration gap: no job is added.
    pub fn add_job(list: &mut JobList, config: &InstallTrackingConfig) {
        Self::add_job_with_snapshot(list, config, &SystemSnapshot::probe());
    }

    /// Like [`Self::add_job`] but with an injected snapshot, so callers
    /// (and tests) control the substituted values.
    pub fn add_job_with_snapshot(
        list: &mut JobList,
        config: &InstallTrackingConfig,
        snapshot: &SystemSnapshot,
    ) {
        if !config.is_enabled() {
            return;
        }
        match config.url() {
            Some(url) => list.push(Box::new(Self::new(url, snapshot))),
            None => {
                tracing::warn!("Install tracking enabled but no URL configured, skipping job");
            }
        }
    }

    /// The fully substituted URL this job will ping.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Job for InstallTrackingJob {
    fn pretty_name(&self) -> String {
        "Install tracking".to_string()
    }

    fn run(&self) -> Result<(), JobError> {
        tracing::debug!(url = %self.url, "Sending install tracking ping");

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| JobError::Request {
                url: self.url.clone(),
                source,
            })?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|source| JobError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(JobError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            })
        }
    }
}

/// Configure the installed machine to report in, using the style the
/// configuration validated.
pub struct MachineTrackingJob {
    style: MachineTrackingStyle,
    uri: Option<String>,
    root: PathBuf,
}

impl MachineTrackingJob {
    /// Append a machine-tracking job to `list` when the category is
    /// enabled. The style was validated at decode time; an enabled
    /// category always carries one.
    pub fn add_job(list: &mut JobList, config: &MachineTrackingConfig) {
        if !config.is_enabled() {
            return;
        }
        let Some(style) = config.style() else {
            // Decode marks style-less machine tracking unavailable, so an
            // enabled config always has a style.
            return;
        };
        list.push(Box::new(Self {
            style,
            uri: config.uri().map(str::to_string),
            root: config.root().to_path_buf(),
        }));
    }

    /// Path of the meta-release file under the target root.
    fn meta_release_path(&self) -> PathBuf {
        self.root.join("etc/update-manager/meta-release")
    }

    /// Point every `URI:` line of the target's meta-release file at the
    /// configured endpoint. Other lines are left untouched.
    fn run_meta_release(&self) -> Result<(), JobError> {
        let uri = self.uri.as_deref().ok_or(JobError::MissingUri)?;
        let path = self.meta_release_path();

        let contents = fs::read_to_string(&path).map_err(|source| JobError::TargetFile {
            path: path.clone(),
            source,
        })?;

        let rewritten: Vec<String> = contents
            .lines()
            .map(|line| {
                if line.starts_with("URI:") {
                    format!("URI: {uri}")
                } else {
                    line.to_string()
                }
            })
            .collect();
        let mut rewritten = rewritten.join("\n");
        if contents.ends_with('\n') {
            rewritten.push('\n');
        }

        fs::write(&path, rewritten).map_err(|source| JobError::TargetFile {
            path: path.clone(),
            source,
        })
    }
}

impl Job for MachineTrackingJob {
    fn pretty_name(&self) -> String {
        "Machine tracking".to_string()
    }

    fn run(&self) -> Result<(), JobError> {
        tracing::debug!(style = ?self.style, root = %self.root.display(), "Configuring machine tracking");
        match self.style {
            MachineTrackingStyle::MetaRelease => self.run_meta_release(),
        }
    }
}
