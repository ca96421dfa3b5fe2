use crate::domain::model::RunnerInvocation;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Port to the container tooling. The production implementation shells out to
/// the docker CLI; tests drive the engine with a recording fake.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// `up -d`, scoped by `project` as the compose project name.
    async fn compose_up(&self, project: &str, deploy_dir: &Path) -> Result<()>;

    /// `down -v`: stop and remove containers, networks and volumes.
    async fn compose_down(&self, project: &str, deploy_dir: &Path) -> Result<()>;

    /// Run the benchmark-runner container to completion (host networking,
    /// results directory bind-mounted, env injected from the target's file).
    async fn run_benchmark(&self, invocation: &RunnerInvocation) -> Result<()>;
}
