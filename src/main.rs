#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bench_comment::comment_cmd::{self, CommentConfig, DEFAULT_OUTPUT};
use bench_comment::tool::BenchstatConfig;

#[derive(Parser, Debug)]
#[command(name = "bench-comment")]
#[command(about = "Turn a benchstat comparison into a markdown PR comment", long_about = None)]
struct Cli {
    /// Baseline benchmark results (e.g. .perf/base.txt)
    baseline: PathBuf,
    /// Candidate benchmark results (e.g. .perf/pr.txt)
    candidate: PathBuf,
    /// Where to write the markdown comment
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Path to the benchstat binary
    #[arg(long, default_value = "benchstat")]
    benchstat: PathBuf,
    /// Extra argument passed to benchstat before the result files (repeatable)
    #[arg(long = "benchstat-arg", value_name = "ARG", allow_hyphen_values = true)]
    benchstat_args: Vec<String>,
    /// Write machine-readable JSON report to this file
    #[arg(long)]
    json: Option<PathBuf>,
    /// Exit with status 1 when any benchmark regressed
    #[arg(long)]
    fail_on_regression: bool,

    /// Enable verbose logging (or set BENCH_COMMENT_LOG)
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("BENCH_COMMENT_LOG").unwrap_or_else(|_| {
        if verbose { "bench_comment=debug".to_string() } else { "bench_comment=warn".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CommentConfig {
        baseline: cli.baseline,
        candidate: cli.candidate,
        output: cli.output,
        json_out: cli.json,
        benchstat: BenchstatConfig::new(cli.benchstat).with_args(cli.benchstat_args),
    };

    match comment_cmd::run(&config) {
        Ok(outcome) => {
            if cli.fail_on_regression && outcome.ci_exit_code != 0 {
                std::process::exit(outcome.ci_exit_code);
            }
        }
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}
