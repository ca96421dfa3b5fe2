use benchctl::core::runner;
use benchctl::utils::{error::ErrorSeverity, logger, validation::Validate};
use benchctl::{CliArgs, DockerCli, Orchestrator, OrchestratorConfig};
use clap::Parser;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose, args.log_json);

    tracing::info!("Starting benchctl");
    tracing::info!("Loading configuration from: {}", args.config);

    let mut config = match OrchestratorConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    // Command-line overrides
    if let Some(results_dir) = &args.results_dir {
        config.run.results_dir = PathBuf::from(results_dir);
    }
    if let Some(runs) = args.runs {
        config.runner.runs = runs;
        tracing::info!("run count overridden to {}", runs);
    }
    if let Some(warmup) = args.warmup {
        config.runner.warmup = warmup;
        tracing::info!("warmup count overridden to {}", warmup);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if !args.only.is_empty() {
        if let Err(e) = config.retain_targets(&args.only) {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
        tracing::info!("restricted to {} target(s) via --only", config.targets.len());
    }

    if args.dry_run {
        tracing::info!("DRY RUN - nothing will be started");
        print_plan(&config);
        return Ok(());
    }

    let docker = DockerCli::new();
    if let Err(e) = docker.check_available().await {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(3);
    }

    let orchestrator = Orchestrator::new(docker, config);

    match orchestrator.run().await {
        Ok(summary) => {
            println!("✅ Benchmark run '{}' completed", summary.run_name);
            println!("📁 Results accumulated in: {}", summary.results_dir.display());
        }
        Err(e) => {
            tracing::error!(
                "Benchmark run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn print_plan(config: &OrchestratorConfig) {
    println!("Run: {}", config.run.name);
    println!("Results directory: {}", config.run.results_dir.display());
    println!("Runner image: {}", config.runner.image);
    for (idx, target) in config.targets.iter().enumerate() {
        let invocation = runner::build_invocation(&config.runner, target, &config.run.results_dir);
        println!();
        println!(
            "{}. {} (project '{}', deploy dir {})",
            idx + 1,
            target.name,
            target.name,
            target.deploy_dir.display()
        );
        println!("   env file: {}", invocation.env_file.display());
        println!("   readiness: {:?}", target.readiness.clone().unwrap_or_default());
        println!("   docker run --rm --network host --env-file {} -v {}:{} {} {}",
            invocation.env_file.display(),
            invocation.results_dir.display(),
            invocation.mount_path,
            invocation.image,
            invocation.args.join(" ")
        );
    }
}
