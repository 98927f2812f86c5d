use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride heap workspace",
    long_about = "A unified CLI for running the demo, the schedule example,\n\
                  benchmarks, load tests and CI checks in the ride heap workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the CLI demo scenario
    Demo,
    /// Run the schedule example with heap tracing enabled
    Example,
    /// Generate a seeded ride file and load it back through the CLI
    Roundtrip {
        /// Number of rides to generate
        #[arg(long, default_value_t = 20)]
        count: usize,
        /// Seed for the ride generator
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Generated file path
        #[arg(long, default_value = "target/rides.json")]
        output: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in ride_heap)
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run the example and the CLI demo
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn git(args: &[&str]) -> ExitStatus {
    eprintln!("+ git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .status()
        .expect("failed to execute git")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = git(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_cli(args: &[&str]) {
    let mut full = vec!["run", "-p", "ride_heap_cli", "--bin", "ride-heap", "--"];
    full.extend_from_slice(args);
    run_cargo(&full);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test ride_heap");
    run_cargo(&["test", "-p", "ride_heap"]);

    step("Test ride_heap_cli");
    run_cargo(&["test", "-p", "ride_heap_cli"]);
}

fn ci_examples() {
    step("Run schedule_run example");
    run_cargo(&["run", "-p", "ride_heap", "--example", "schedule_run"]);

    step("Run CLI demo");
    run_cli(&["demo"]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "ride_heap", "--bench", "heap_ops"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_cli(&["demo"]),
        Commands::Example => {
            std::env::set_var("RUST_LOG", "ride_heap=debug");
            run_cargo(&["run", "-p", "ride_heap", "--example", "schedule_run"]);
        }
        Commands::Roundtrip {
            count,
            seed,
            output,
        } => {
            let count = count.to_string();
            let seed = seed.to_string();
            step("Generate rides");
            run_cli(&[
                "generate", "--count", &count, "--seed", &seed, "--output", &output,
            ]);
            step("Load rides");
            run_cli(&["load", "--input", &output, "--view", "times", "--sort"]);
        }
        Commands::Bench => {
            run_cargo(&["bench", "--package", "ride_heap", "--bench", "heap_ops"]);
        }
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                std::fs::remove_dir_all(baseline_dir).expect("failed to remove target/criterion");
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_cargo(&[
                "bench",
                "--package",
                "ride_heap",
                "--bench",
                "heap_ops",
                "--",
                "--save-baseline",
                "main",
            ]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_cargo(&[
                "bench",
                "--package",
                "ride_heap",
                "--bench",
                "heap_ops",
                "--",
                "--baseline",
                "main",
            ]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "ride_heap",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
