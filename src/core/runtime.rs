use crate::domain::model::RunnerInvocation;
use crate::domain::ports::ContainerRuntime;
use crate::utils::error::{BenchError, Result};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use tokio::process::Command;

/// `ContainerRuntime` backed by the docker CLI. Compose commands go through
/// the standalone `docker-compose` binary, falling back to the `docker
/// compose` plugin when the binary is not installed.
#[derive(Debug, Default, Clone)]
pub struct DockerCli;

impl DockerCli {
    pub fn new() -> Self {
        Self
    }

    /// Fail early when docker itself is missing, before any stack is touched.
    pub async fn check_available(&self) -> Result<()> {
        match Command::new("docker").arg("--version").output().await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BenchError::CommandNotFound {
                program: "docker".to_string(),
            }),
            Err(e) => Err(e.into()),
            Ok(output) if !output.status.success() => Err(BenchError::CommandFailed {
                program: "docker --version".to_string(),
                status: output.status.to_string(),
            }),
            Ok(_) => Ok(()),
        }
    }

    async fn run_compose<I, S>(&self, deploy_dir: &Path, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S> + Clone,
        S: AsRef<OsStr>,
    {
        match Command::new("docker-compose")
            .args(args.clone())
            .current_dir(deploy_dir)
            .status()
            .await
        {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(BenchError::CommandFailed {
                program: "docker-compose".to_string(),
                status: status.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // No standalone binary; use the compose plugin.
                let status = Command::new("docker")
                    .arg("compose")
                    .args(args)
                    .current_dir(deploy_dir)
                    .status()
                    .await?;
                if !status.success() {
                    return Err(BenchError::CommandFailed {
                        program: "docker compose".to_string(),
                        status: status.to_string(),
                    });
                }
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn compose_up(&self, project: &str, deploy_dir: &Path) -> Result<()> {
        self.run_compose(deploy_dir, ["-p", project, "up", "-d"]).await
    }

    async fn compose_down(&self, project: &str, deploy_dir: &Path) -> Result<()> {
        self.run_compose(deploy_dir, ["-p", project, "down", "-v"]).await
    }

    async fn run_benchmark(&self, invocation: &RunnerInvocation) -> Result<()> {
        // Host networking so the runner reaches the database on its published
        // host ports; results dir mounted read/write at the fixed path.
        let results_host = std::fs::canonicalize(&invocation.results_dir)?;
        let mount = format!("{}:{}", results_host.display(), invocation.mount_path);

        // kill_on_drop: an operator interrupt cancels this future; the runner
        // must not outlive the stack it is benchmarking.
        let status = Command::new("docker")
            .args(["run", "--rm", "--network", "host"])
            .arg("--env-file")
            .arg(&invocation.env_file)
            .args(["-v", &mount])
            .arg(&invocation.image)
            .args(&invocation.args)
            .kill_on_drop(true)
            .status()
            .await;

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => {
                let target = invocation
                    .args
                    .iter()
                    .position(|a| a == "--db")
                    .and_then(|i| invocation.args.get(i + 1))
                    .cloned()
                    .unwrap_or_default();
                Err(BenchError::RunnerFailed {
                    target,
                    code: status.code(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BenchError::CommandNotFound {
                program: "docker".to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
