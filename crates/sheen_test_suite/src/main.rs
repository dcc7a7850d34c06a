//! Visual Test Runner
//!
//! Command-line tool for running visual regression tests for Sheen.
//!
//! Usage:
//!   sheen-visual-tests                     # Run all tests
//!   sheen-visual-tests --filter shadow     # Run tests matching "shadow"
//!   sheen-visual-tests --list              # List all tests
//!   sheen-visual-tests --config sheen.toml # Harness and rasterizer settings

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sheen_test_suite::{runner::TestRunner, tests, TestHarness, TestHarnessConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sheen-visual-tests")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sheen visual regression tests", long_about = None)]
struct Cli {
    /// List all tests and exit
    #[arg(long)]
    list: bool,

    /// Only run tests whose name or category contains this pattern
    #[arg(short, long)]
    filter: Option<String>,

    /// TOML file with harness settings and a [raster] table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer())
        .init();

    if cli.list {
        println!("Available test suites:");
        for suite in tests::all_suites() {
            println!("\n  {}:", suite.name);
            for case in &suite.cases {
                println!("    - {}", case.name);
            }
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => TestHarnessConfig::load(path)?,
        None => TestHarnessConfig::default(),
    };
    if let Some(output) = cli.output {
        config.reference_dir = output.join("references");
        config.output_dir = output;
    }

    println!("╔══════════════════════════════════════════╗");
    println!("║      SHEEN VISUAL REGRESSION TESTS       ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut runner = TestRunner::with_harness(TestHarness::with_config(config)?);

    for suite in tests::all_suites() {
        runner.add_suite(suite);
    }

    if let Some(ref pattern) = cli.filter {
        println!("Running tests matching: {}\n", pattern);
        runner.filter(pattern);
    }

    let result = runner.run();
    result.print_summary();

    if result.all_passed() {
        println!("\nAll tests passed!");
        Ok(())
    } else {
        std::process::exit(1);
    }
}
