pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::toml_config::OrchestratorConfig;
pub use config::CliArgs;
pub use core::engine::Orchestrator;
pub use core::runtime::DockerCli;
pub use domain::model::{RunSummary, RunnerInvocation, TargetReport, TargetStatus};
pub use domain::ports::ContainerRuntime;
pub use utils::error::{BenchError, Result};
