pub mod toml_config;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "benchctl")]
#[command(about = "Run database benchmarks sequentially against docker-compose stacks")]
pub struct CliArgs {
    /// Path to the orchestration config file
    #[arg(short, long, default_value = "benchctl.toml")]
    pub config: String,

    /// Override the results directory from the config
    #[arg(long)]
    pub results_dir: Option<String>,

    /// Run only these targets (comma-separated, configured order is kept)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Override the measured run count for every target
    #[arg(long)]
    pub runs: Option<u32>,

    /// Override the warmup count for every target
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Show the plan (compose projects and runner argv) without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON (for CI log collectors)
    #[arg(long)]
    pub log_json: bool,
}
