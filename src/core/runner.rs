use crate::config::toml_config::{RunnerConfig, RunnerOverrides, TargetConfig};
use crate::domain::model::RunnerInvocation;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;

/// Assemble the runner invocation for one target, merging global runner
/// settings with the target's overrides. Flags are passed through verbatim;
/// the orchestrator does not validate their semantics.
pub fn build_invocation(
    runner: &RunnerConfig,
    target: &TargetConfig,
    results_dir: &Path,
) -> RunnerInvocation {
    build_invocation_at(runner, target, results_dir, Utc::now())
}

fn build_invocation_at(
    runner: &RunnerConfig,
    target: &TargetConfig,
    results_dir: &Path,
    now: DateTime<Utc>,
) -> RunnerInvocation {
    let empty = RunnerOverrides::default();
    let overrides = target.runner_overrides.as_ref().unwrap_or(&empty);

    let benchmarks = overrides
        .benchmarks
        .as_ref()
        .map(|sel| sel.as_arg())
        .unwrap_or_else(|| runner.benchmarks.as_arg());
    let runs = overrides.runs.unwrap_or(runner.runs);
    let warmup = overrides.warmup.unwrap_or(runner.warmup);

    let mut args = vec![
        "--db".to_string(),
        target.name.clone(),
        "--benchmark".to_string(),
        benchmarks,
        "--runs".to_string(),
        runs.to_string(),
        "--warmup".to_string(),
        warmup.to_string(),
    ];

    let extras = &overrides.extras;
    push_opt(&mut args, "--job-id", pick(&extras.job_id, &runner.extras.job_id));
    push_opt(
        &mut args,
        "--vehicle-id",
        pick(&extras.vehicle_id, &runner.extras.vehicle_id),
    );
    if let Some(ids) = extras
        .vehicle_ids
        .as_ref()
        .or(runner.extras.vehicle_ids.as_ref())
    {
        args.push("--vehicle-ids".to_string());
        args.push(
            ids.iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    push_opt(&mut args, "--start", pick(&extras.start_ts, &runner.extras.start_ts));
    push_opt(&mut args, "--end", pick(&extras.end_ts, &runner.extras.end_ts));
    if let Some(marker) = extras
        .insert_ts
        .as_ref()
        .or(runner.extras.insert_ts.as_ref())
    {
        let value = if marker == "now" {
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        } else {
            marker.clone()
        };
        args.push("--insert-ts".to_string());
        args.push(value);
    }
    push_opt(&mut args, "--limit", pick(&extras.limit, &runner.extras.limit));
    push_opt(&mut args, "--out", pick(&extras.out, &runner.extras.out));

    RunnerInvocation {
        image: runner.image.clone(),
        env_file: target.env_file_path(),
        results_dir: results_dir.to_path_buf(),
        mount_path: runner.mount_path.clone(),
        args,
    }
}

fn pick<T: Clone>(first: &Option<T>, second: &Option<T>) -> Option<T> {
    first.clone().or_else(|| second.clone())
}

fn push_opt<T: ToString>(args: &mut Vec<String>, flag: &str, value: Option<T>) {
    if let Some(v) = value {
        args.push(flag.to_string());
        args.push(v.to_string());
    }
}
