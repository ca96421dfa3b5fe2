use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One `docker run` of the external benchmark-runner image.
///
/// The orchestrator only assembles this; the flag semantics belong to the
/// runner image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerInvocation {
    pub image: String,
    /// Env file injected into the runner process (`--env-file`).
    pub env_file: PathBuf,
    /// Host results directory, bind-mounted read/write.
    pub results_dir: PathBuf,
    /// Fixed in-container mount point for the results directory.
    pub mount_path: String,
    /// Argument vector handed to the runner entrypoint.
    pub args: Vec<String>,
}

/// Per-target lifecycle. `Waiting` implies the stack came up; terminal states
/// are `Done`, the failure variants, and `Skipped` (never attempted because
/// an earlier target failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    NotStarted,
    Waiting,
    Benchmarking,
    StackDown,
    Done,
    StackFailed,
    NotReady,
    BenchFailed,
    Interrupted,
    Skipped,
}

impl TargetStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TargetStatus::Done)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetReport {
    pub name: String,
    pub status: TargetStatus,
    #[serde(with = "duration_secs")]
    pub ready_wait: Duration,
    #[serde(with = "duration_secs")]
    pub bench_time: Duration,
    /// Whether `down -v` was invoked for this target.
    pub torn_down: bool,
}

impl TargetReport {
    pub fn skipped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: TargetStatus::Skipped,
            ready_wait: Duration::ZERO,
            bench_time: Duration::ZERO,
            torn_down: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results_dir: PathBuf,
    pub targets: Vec<TargetReport>,
}

impl RunSummary {
    pub fn completed(&self) -> usize {
        self.targets.iter().filter(|t| t.status.is_success()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.completed() == self.targets.len()
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_secs_f64().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs_f64(f64::deserialize(d)?))
    }
}
