//! SQLite In-Memory Insert/Select Benchmark
//!
//! Measures how long an in-memory SQLite database (through `rusqlite`) takes
//! to execute a large number of identical wide INSERT statements, and how
//! long a single SELECT with one equality predicate per column takes.
//!
//! Run the benchmark: `cargo run --release`
//! Run the criterion harness: `cargo bench`
//! Run tests: `cargo test`

pub mod config;
pub mod driver;
pub mod query;
pub mod report;
pub mod timer;
pub mod values;
