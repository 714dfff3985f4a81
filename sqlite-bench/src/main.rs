//! Standalone benchmark runner.
//!
//! Prints the engine banner, the timed Insertion and Select blocks, every row
//! matched by the SELECT, a summary, and a final status line. Exits non-zero
//! on any SQLite error.
//!
//! Usage:
//!   cargo run --release
//!   BENCH_ROWS=1000 BENCH_SEED=42 BENCH_LOG_LEVEL=debug cargo run --release

use log::info;
use sqlite_bench::config::BenchConfig;
use sqlite_bench::driver::run_benchmark;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = BenchConfig::from_env();

    if let Err(e) = bench_core::initialize_logger(config.log_level, config.log_file.as_deref()) {
        eprintln!("Failed to initialize logger: {e:#}. Exiting.");
        return ExitCode::FAILURE;
    }

    info!(
        "Starting benchmark (rows={}, columns={}, seed={:?}, logfile={})",
        config.rows,
        config.columns,
        config.seed,
        config.log_file.as_deref().unwrap_or("none")
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = run_benchmark(&config, &mut out);
    let _ = out.flush();
    outcome.exit_code()
}
