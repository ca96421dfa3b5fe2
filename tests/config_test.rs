use benchctl::config::toml_config::{BenchmarkSelection, OrchestratorConfig, ReadinessConfig};
use benchctl::utils::validation::Validate;
use benchctl::BenchError;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"
[run]
name = "tsdb-comparison"

[runner]
image = "bench-runner:latest"
job_id = 3137

[[targets]]
name = "mssql_narrow"
deploy_dir = "deploy/mssql-narrow"

[targets.readiness]
kind = "tcp"
port = 1433

[[targets]]
name = "questdb"
deploy_dir = "deploy/questdb"
env_file = "questdb.env"

[targets.runner]
benchmarks = ["job_full"]
vehicle_id = 42
"#;

fn load(content: &str) -> OrchestratorConfig {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    OrchestratorConfig::from_file(file.path()).unwrap()
}

#[test]
fn sample_config_parses_with_defaults() {
    let config = load(SAMPLE);
    config.validate().unwrap();

    assert_eq!(config.run.results_dir.to_str(), Some("results"));
    assert_eq!(config.runner.mount_path, "/results");
    assert_eq!(config.runner.runs, 5);
    assert_eq!(config.runner.warmup, 1);
    assert_eq!(config.runner.extras.job_id, Some(3137));
    assert_eq!(
        config.runner.benchmarks,
        BenchmarkSelection::Keyword("all".to_string())
    );

    assert_eq!(config.targets.len(), 2);
    assert_eq!(config.targets[0].env_file, ".env");
    assert_eq!(
        config.targets[0].readiness,
        Some(ReadinessConfig::Tcp {
            host: "localhost".to_string(),
            port: 1433,
            timeout_seconds: 60,
            interval_ms: 500,
        })
    );
    assert_eq!(
        config.targets[1].env_file_path().to_str(),
        Some("deploy/questdb/questdb.env")
    );
    let overrides = config.targets[1].runner_overrides.as_ref().unwrap();
    assert_eq!(overrides.extras.vehicle_id, Some(42));
}

#[test]
fn global_runner_settings_bind_to_the_runner_table() {
    let config = load(
        r#"
[run]
name = "tsdb-comparison"

[runner]
image = "bench-runner:latest"
runs = 7
warmup = 2
benchmarks = ["job_full"]

[[targets]]
name = "questdb"
deploy_dir = "deploy/questdb"
"#,
    );
    config.validate().unwrap();

    // Global benchmarks/runs/warmup land on RunnerConfig itself; the global
    // extras only carry pass-through flags.
    assert_eq!(config.runner.runs, 7);
    assert_eq!(config.runner.warmup, 2);
    assert_eq!(
        config.runner.benchmarks,
        BenchmarkSelection::Named(vec!["job_full".to_string()])
    );
}

#[test]
fn duplicate_target_names_are_rejected() {
    let mut config = load(SAMPLE);
    config.targets[1].name = "mssql_narrow".to_string();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, BenchError::InvalidConfigValueError { .. }));
}

#[test]
fn target_name_must_be_a_valid_project_name() {
    let mut config = load(SAMPLE);
    config.targets[0].name = "MSSQL Narrow".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn zero_runs_is_rejected() {
    let mut config = load(SAMPLE);
    config.runner.runs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn empty_target_list_is_rejected() {
    let mut config = load(SAMPLE);
    config.targets.clear();
    assert!(config.validate().is_err());
}

#[test]
fn http_probe_url_must_be_http() {
    let mut config = load(SAMPLE);
    config.targets[0].readiness = Some(ReadinessConfig::Http {
        url: "ftp://localhost/ping".to_string(),
        timeout_seconds: 60,
        interval_ms: 500,
    });
    assert!(config.validate().is_err());
}

#[test]
fn benchmark_keyword_other_than_all_is_rejected() {
    let mut config = load(SAMPLE);
    config.runner.benchmarks = BenchmarkSelection::Keyword("some".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn retain_targets_keeps_configured_order_and_rejects_unknown_names() {
    let mut config = load(SAMPLE);
    config.retain_targets(&["questdb".to_string()]).unwrap();
    assert_eq!(config.targets.len(), 1);
    assert_eq!(config.targets[0].name, "questdb");

    let mut config = load(SAMPLE);
    let err = config
        .retain_targets(&["mssql_wide".to_string()])
        .unwrap_err();
    assert!(matches!(err, BenchError::ConfigError { .. }));
}
