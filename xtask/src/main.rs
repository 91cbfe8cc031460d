use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the hotel booking workspace",
    long_about = "A unified CLI for running simulations, parameter sweeps,\n\
                  benchmarks, and CI checks in the hotel booking workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both booking policies over the default hotel
    Run {
        /// Days to simulate
        #[arg(long, default_value_t = 90)]
        days: u32,
    },
    /// Run a hotel described by a JSON parameter file
    RunFile {
        /// Path to the parameter file
        path: String,
        /// Days to simulate
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Run a parameter sweep experiment
    Sweep {
        /// Preset parameter space
        #[arg(value_enum, default_value_t = Preset::PolicyComparison)]
        preset: Preset,
        /// Directory for the CSV and JSON results
        #[arg(long, env = "HOTEL_SWEEP_OUT", default_value = ".")]
        out_dir: String,
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
    /// Run load tests (ignored tests in hotel_core)
    LoadTest,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    PolicyComparison,
    CapacitySensitivity,
    Minimal,
}

impl Preset {
    fn name(self) -> &'static str {
        match self {
            Self::PolicyComparison => "policy_comparison",
            Self::CapacitySensitivity => "capacity_sensitivity",
            Self::Minimal => "minimal",
        }
    }
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run the examples
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

fn spawn(program: &str, args: &[&str]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    match Command::new(program).args(args).status() {
        Ok(status) => status,
        Err(error) => {
            eprintln!("failed to execute {program}: {error}");
            exit(1);
        }
    }
}

fn run(program: &str, args: &[&str]) {
    let status = spawn(program, args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_cargo(args: &[&str]) {
    run("cargo", args);
}

fn run_git(args: &[&str]) {
    run("git", args);
}

fn run_example(package: &str, example: &str, extra: &[&str]) {
    let mut args = vec!["run", "-p", package, "--example", example, "--release"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
}

fn bench(extra: &[&str]) {
    let mut args = vec!["bench", "--package", "hotel_core", "--bench", "performance"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
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

    step("Test hotel_core");
    run_cargo(&["test", "-p", "hotel_core"]);

    step("Test hotel_experiments");
    run_cargo(&["test", "-p", "hotel_experiments"]);
}

fn ci_examples() {
    step("Run hotel_run (both policies, 90 days)");
    run_example("hotel_core", "hotel_run", &["90"]);

    step("Run parameter_sweep (minimal preset)");
    let out_dir = std::env::temp_dir().join("hotel-ci-sweep");
    let out_dir = out_dir.to_string_lossy();
    run_example("hotel_experiments", "parameter_sweep", &["minimal", &out_dir]);
}

fn ci_bench() {
    step("Run benchmarks");
    bench(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { days } => {
            let days = days.to_string();
            run_example("hotel_core", "hotel_run", &[&days]);
        }
        Commands::RunFile { path, days } => {
            let days = days.to_string();
            run_example("hotel_core", "hotel_from_json", &[&path, &days]);
        }
        Commands::Sweep { preset, out_dir } => {
            run_example("hotel_experiments", "parameter_sweep", &[preset.name(), &out_dir]);
        }
        Commands::Bench => bench(&[]),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                if let Err(error) = std::fs::remove_dir_all(baseline_dir) {
                    eprintln!("failed to remove target/criterion: {error}");
                    exit(1);
                }
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            bench(&["--save-baseline", "main"]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            bench(&["--baseline", "main"]);

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
                "hotel_core",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
