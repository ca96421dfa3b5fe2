use crate::config::toml_config::{OrchestratorConfig, TargetConfig};
use crate::core::{probe, runner};
use crate::domain::model::{RunSummary, TargetReport, TargetStatus};
use crate::domain::ports::ContainerRuntime;
use crate::utils::error::{BenchError, Result};
use chrono::Utc;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::Instant;

type CtrlC = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

/// Sequential benchmark orchestrator. One target at a time: compose up,
/// readiness wait, runner container, compose down. Teardown runs on every
/// path after a stack was brought up, including runner failure and Ctrl-C.
pub struct Orchestrator<R: ContainerRuntime> {
    runtime: R,
    config: OrchestratorConfig,
}

impl<R: ContainerRuntime> Orchestrator<R> {
    pub fn new(runtime: R, config: OrchestratorConfig) -> Self {
        Self { runtime, config }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.run_with_interrupt(tokio::signal::ctrl_c()).await
    }

    /// `run` with the operator-interrupt future injected. The in-flight
    /// target is torn down when `interrupt` resolves; tests drive this seam
    /// directly instead of raising a real signal.
    pub async fn run_with_interrupt<F>(&self, interrupt: F) -> Result<RunSummary>
    where
        F: Future<Output = std::io::Result<()>> + Send + 'static,
    {
        let started_at = Utc::now();
        let results_dir = &self.config.run.results_dir;

        // Must exist before the first runner invocation; idempotent, and the
        // contents are never cleared between targets.
        tokio::fs::create_dir_all(results_dir).await?;

        let mut ctrl_c: CtrlC = Box::pin(interrupt);

        let mut reports = Vec::with_capacity(self.config.targets.len());
        let mut failure: Option<BenchError> = None;

        for (idx, target) in self.config.targets.iter().enumerate() {
            if failure.is_some() {
                // A failure stops the run; remaining targets are not attempted.
                reports.push(TargetReport::skipped(&target.name));
                continue;
            }

            tracing::info!(
                "[{}/{}] benchmarking target '{}'",
                idx + 1,
                self.config.targets.len(),
                target.name
            );
            let (report, err) = self.run_target(target, &mut ctrl_c).await;
            reports.push(report);
            failure = err;
        }

        let summary = RunSummary {
            run_name: self.config.run.name.clone(),
            started_at,
            finished_at: Utc::now(),
            results_dir: results_dir.clone(),
            targets: reports,
        };
        if let Err(e) = self.write_summary(&summary).await {
            // Never let a summary-write problem mask the benchmark failure.
            if failure.is_none() {
                return Err(e);
            }
            tracing::warn!("failed to write run summary: {}", e);
        }

        for report in &summary.targets {
            tracing::info!("  {:<16} {:?}", report.name, report.status);
        }
        tracing::info!(
            "{}/{} targets completed; results in {}",
            summary.completed(),
            summary.targets.len(),
            summary.results_dir.display()
        );

        match failure {
            Some(e) => Err(e),
            None => Ok(summary),
        }
    }

    async fn run_target(
        &self,
        target: &TargetConfig,
        ctrl_c: &mut CtrlC,
    ) -> (TargetReport, Option<BenchError>) {
        let mut report = TargetReport {
            name: target.name.clone(),
            status: TargetStatus::NotStarted,
            ready_wait: Duration::ZERO,
            bench_time: Duration::ZERO,
            torn_down: false,
        };

        // Project name == database key, so sibling stacks and stale runs can
        // never collide on container or network names.
        if let Err(e) = self
            .runtime
            .compose_up(&target.name, &target.deploy_dir)
            .await
        {
            tracing::error!("{}: compose up failed: {}", target.name, e);
            report.status = TargetStatus::StackFailed;
            // up may have created part of the stack; clean it best-effort
            self.tear_down(target, &mut report).await;
            return (report, Some(e));
        }
        report.status = TargetStatus::Waiting;
        let readiness = target.readiness.clone().unwrap_or_default();
        let ready_started = Instant::now();
        let ready = tokio::select! {
            r = probe::wait_ready(&target.name, &readiness) => r,
            _ = ctrl_c.as_mut() => Err(BenchError::Interrupted),
        };
        report.ready_wait = ready_started.elapsed();
        if let Err(e) = ready {
            report.status = match e {
                BenchError::Interrupted => TargetStatus::Interrupted,
                _ => TargetStatus::NotReady,
            };
            tracing::error!("{}: {}", target.name, e);
            self.tear_down(target, &mut report).await;
            return (report, Some(e));
        }

        report.status = TargetStatus::Benchmarking;
        let invocation =
            runner::build_invocation(&self.config.runner, target, &self.config.run.results_dir);
        tracing::debug!("{}: runner argv: {}", target.name, invocation.args.join(" "));
        let bench_started = Instant::now();
        let bench = tokio::select! {
            r = self.runtime.run_benchmark(&invocation) => r,
            _ = ctrl_c.as_mut() => Err(BenchError::Interrupted),
        };
        report.bench_time = bench_started.elapsed();

        let err = match bench {
            Ok(()) => None,
            Err(e) => {
                report.status = match e {
                    BenchError::Interrupted => TargetStatus::Interrupted,
                    _ => TargetStatus::BenchFailed,
                };
                tracing::error!("{}: {}", target.name, e);
                Some(e)
            }
        };

        let was_ok = err.is_none();
        if was_ok {
            report.status = TargetStatus::StackDown;
        }
        self.tear_down(target, &mut report).await;
        if was_ok && report.torn_down {
            report.status = TargetStatus::Done;
            tracing::info!(
                "{}: done in {:.1}s",
                target.name,
                report.bench_time.as_secs_f64()
            );
            (report, None)
        } else if was_ok {
            // Bench succeeded but teardown failed; the next target would
            // collide on ports, so this still aborts the run.
            (
                report,
                Some(BenchError::CommandFailed {
                    program: "docker compose down -v".to_string(),
                    status: format!("teardown failed for '{}'", target.name),
                }),
            )
        } else {
            (report, err)
        }
    }

    /// `down -v`: containers, networks and volumes, so the next target starts
    /// from clean persistent storage.
    async fn tear_down(&self, target: &TargetConfig, report: &mut TargetReport) {
        match self
            .runtime
            .compose_down(&target.name, &target.deploy_dir)
            .await
        {
            Ok(()) => report.torn_down = true,
            Err(e) => {
                tracing::warn!("{}: compose down -v failed: {}", target.name, e);
            }
        }
    }

    async fn write_summary(&self, summary: &RunSummary) -> Result<()> {
        let path = self.config.run.results_dir.join("run_summary.json");
        let json = serde_json::to_string_pretty(summary)?;
        tokio::fs::write(&path, json).await?;
        tracing::debug!("run summary written to {}", path.display());
        Ok(())
    }
}
