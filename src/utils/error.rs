use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Readiness probe HTTP error: {0}")]
    ProbeHttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Required command '{program}' was not found")]
    CommandNotFound { program: String },

    #[error("Command '{program}' exited with {status}")]
    CommandFailed { program: String, status: String },

    #[error("Benchmark runner failed for target '{target}' (exit code {code:?})")]
    RunnerFailed { target: String, code: Option<i32> },

    #[error("Target '{target}' did not become ready within {waited_secs}s")]
    ReadinessTimeout { target: String, waited_secs: u64 },

    #[error("Run interrupted by operator")]
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Runtime,
    Readiness,
    Benchmark,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BenchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BenchError::ConfigError { .. }
            | BenchError::InvalidConfigValueError { .. }
            | BenchError::TomlError(_) => ErrorCategory::Config,
            BenchError::ProbeHttpError(_) | BenchError::ReadinessTimeout { .. } => {
                ErrorCategory::Readiness
            }
            BenchError::RunnerFailed { .. } => ErrorCategory::Benchmark,
            BenchError::CommandNotFound { .. } | BenchError::IoError(_) => ErrorCategory::System,
            BenchError::CommandFailed { .. }
            | BenchError::SerializationError(_)
            | BenchError::Interrupted => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BenchError::ConfigError { .. }
            | BenchError::InvalidConfigValueError { .. }
            | BenchError::TomlError(_) => ErrorSeverity::High,
            BenchError::ReadinessTimeout { .. }
            | BenchError::ProbeHttpError(_)
            | BenchError::Interrupted => ErrorSeverity::Medium,
            BenchError::RunnerFailed { .. } | BenchError::CommandFailed { .. } => {
                ErrorSeverity::High
            }
            BenchError::CommandNotFound { .. }
            | BenchError::IoError(_)
            | BenchError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BenchError::ConfigError { message } => format!("Configuration problem: {}", message),
            BenchError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            BenchError::TomlError(e) => format!("Could not parse the config file: {}", e),
            BenchError::CommandNotFound { program } => {
                format!("'{}' is not installed or not on PATH", program)
            }
            BenchError::CommandFailed { program, status } => {
                format!("'{}' failed ({})", program, status)
            }
            BenchError::RunnerFailed { target, .. } => {
                format!("The benchmark runner failed against '{}'", target)
            }
            BenchError::ReadinessTimeout {
                target,
                waited_secs,
            } => {
                format!("'{}' never became ready ({}s timeout)", target, waited_secs)
            }
            BenchError::Interrupted => "Run cancelled; the current stack was torn down".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Config => {
                "Check the TOML config file against the documented schema".to_string()
            }
            ErrorCategory::Readiness => {
                "Increase the probe timeout, or inspect the stack with docker compose logs"
                    .to_string()
            }
            ErrorCategory::Benchmark => {
                "Inspect the runner's console output; the target's stack was already torn down"
                    .to_string()
            }
            ErrorCategory::System => {
                "Verify docker is installed and the current user can run it".to_string()
            }
            ErrorCategory::Runtime => {
                "Re-run when the underlying issue is fixed; results are append-only".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
