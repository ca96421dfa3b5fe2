use crate::utils::error::{BenchError, Result};
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_project_name, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    pub run: RunConfig,
    pub runner: RunnerConfig,
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub name: String,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

/// Contract for the external benchmark-runner image. Everything here is passed
/// through; flag semantics belong to the runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub image: String,
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
    #[serde(default = "default_benchmarks")]
    pub benchmarks: BenchmarkSelection,
    #[serde(default = "default_runs")]
    pub runs: u32,
    #[serde(default = "default_warmup")]
    pub warmup: u32,
    #[serde(flatten)]
    pub extras: RunnerExtras,
}

/// Either the literal `"all"` or an explicit list of benchmark names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BenchmarkSelection {
    Keyword(String),
    Named(Vec<String>),
}

impl BenchmarkSelection {
    pub fn as_arg(&self) -> String {
        match self {
            BenchmarkSelection::Keyword(kw) => kw.clone(),
            BenchmarkSelection::Named(names) => names.join(","),
        }
    }
}

/// Optional runner flags. Present both globally (`[runner]`) and per target
/// (`[targets.runner]`); per-target values win.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerExtras {
    pub job_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub vehicle_ids: Option<Vec<i64>>,
    pub start_ts: Option<String>,
    pub end_ts: Option<String>,
    /// Insert-timestamp marker. The literal `"now"` is replaced with the
    /// invocation time in RFC 3339.
    pub insert_ts: Option<String>,
    pub limit: Option<u32>,
    /// Explicit output path inside the mount. When absent the runner's own
    /// append behavior decides.
    pub out: Option<String>,
}

/// Per-target runner settings. `benchmarks`/`runs`/`warmup` shadow the global
/// `[runner]` values; only here can they vary per target, since the global
/// table binds those keys directly on `RunnerConfig`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerOverrides {
    pub benchmarks: Option<BenchmarkSelection>,
    pub runs: Option<u32>,
    pub warmup: Option<u32>,
    #[serde(flatten)]
    pub extras: RunnerExtras,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Database key. Doubles as the compose project name and the runner's
    /// `--db` selector.
    pub name: String,
    pub deploy_dir: PathBuf,
    #[serde(default = "default_env_file")]
    pub env_file: String,
    pub readiness: Option<ReadinessConfig>,
    #[serde(rename = "runner", default)]
    pub runner_overrides: Option<RunnerOverrides>,
}

impl TargetConfig {
    /// Env file location, relative to the deploy directory.
    pub fn env_file_path(&self) -> PathBuf {
        self.deploy_dir.join(&self.env_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadinessConfig {
    /// Unconditional wait, kept for databases without a cheap probe endpoint.
    Delay { seconds: u64 },
    Tcp {
        #[serde(default = "default_probe_host")]
        host: String,
        port: u16,
        #[serde(default = "default_probe_timeout")]
        timeout_seconds: u64,
        #[serde(default = "default_probe_interval")]
        interval_ms: u64,
    },
    Http {
        url: String,
        #[serde(default = "default_probe_timeout")]
        timeout_seconds: u64,
        #[serde(default = "default_probe_interval")]
        interval_ms: u64,
    },
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        ReadinessConfig::Delay { seconds: 10 }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_mount_path() -> String {
    "/results".to_string()
}

fn default_benchmarks() -> BenchmarkSelection {
    BenchmarkSelection::Keyword("all".to_string())
}

fn default_runs() -> u32 {
    5
}

fn default_warmup() -> u32 {
    1
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_probe_host() -> String {
    "localhost".to_string()
}

fn default_probe_timeout() -> u64 {
    60
}

fn default_probe_interval() -> u64 {
    500
}

impl OrchestratorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: OrchestratorConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Keep only the named targets, preserving configured order.
    pub fn retain_targets(&mut self, names: &[String]) -> Result<()> {
        let known: HashSet<&str> = self.targets.iter().map(|t| t.name.as_str()).collect();
        for name in names {
            if !known.contains(name.as_str()) {
                return Err(BenchError::ConfigError {
                    message: format!("--only names unknown target '{}'", name),
                });
            }
        }
        self.targets.retain(|t| names.iter().any(|n| n == &t.name));
        Ok(())
    }
}

impl Validate for OrchestratorConfig {
    fn validate(&self) -> Result<()> {
        if self.run.name.is_empty() {
            return Err(BenchError::ConfigError {
                message: "run.name must not be empty".to_string(),
            });
        }
        validate_path("run.results_dir", &self.run.results_dir.to_string_lossy())?;
        if self.runner.image.is_empty() {
            return Err(BenchError::ConfigError {
                message: "runner.image must not be empty".to_string(),
            });
        }
        if !self.runner.mount_path.starts_with('/') {
            return Err(BenchError::InvalidConfigValueError {
                field: "runner.mount_path".to_string(),
                value: self.runner.mount_path.clone(),
                reason: "In-container mount path must be absolute".to_string(),
            });
        }
        validate_positive_number("runner.runs", self.runner.runs as usize, 1)?;
        validate_selection("runner.benchmarks", &self.runner.benchmarks)?;

        if self.targets.is_empty() {
            return Err(BenchError::ConfigError {
                message: "at least one [[targets]] entry is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            validate_project_name("targets.name", &target.name)?;
            if !seen.insert(target.name.as_str()) {
                return Err(BenchError::InvalidConfigValueError {
                    field: "targets.name".to_string(),
                    value: target.name.clone(),
                    reason: "Duplicate target name".to_string(),
                });
            }
            validate_path("targets.deploy_dir", &target.deploy_dir.to_string_lossy())?;
            validate_path("targets.env_file", &target.env_file)?;

            if let Some(ReadinessConfig::Http { url, .. }) = &target.readiness {
                validate_url("targets.readiness.url", url)?;
            }
            if let Some(overrides) = &target.runner_overrides {
                if let Some(runs) = overrides.runs {
                    validate_positive_number("targets.runner.runs", runs as usize, 1)?;
                }
                if let Some(sel) = &overrides.benchmarks {
                    validate_selection("targets.runner.benchmarks", sel)?;
                }
            }
        }

        Ok(())
    }
}

fn validate_selection(field: &str, sel: &BenchmarkSelection) -> Result<()> {
    match sel {
        BenchmarkSelection::Keyword(kw) if kw == "all" => Ok(()),
        BenchmarkSelection::Keyword(kw) => Err(BenchError::InvalidConfigValueError {
            field: field.to_string(),
            value: kw.clone(),
            reason: "Only the keyword 'all' or a list of benchmark names is accepted".to_string(),
        }),
        BenchmarkSelection::Named(names) if names.is_empty() => {
            Err(BenchError::InvalidConfigValueError {
                field: field.to_string(),
                value: "[]".to_string(),
                reason: "Benchmark list must not be empty".to_string(),
            })
        }
        BenchmarkSelection::Named(_) => Ok(()),
    }
}
