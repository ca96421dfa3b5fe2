pub mod engine;
pub mod probe;
pub mod runner;
pub mod runtime;

pub use crate::domain::model::{RunSummary, RunnerInvocation, TargetReport, TargetStatus};
pub use crate::domain::ports::ContainerRuntime;
pub use crate::utils::error::Result;
