//! Benchmark configuration.
//!
//! Defaults: 100 000 rows, 68 value columns, pool `val1` growing to
//! `val1, val2, val3`. A few settings can be overridden from the environment:
//!
//! | Variable          | Default  |
//! |-------------------|----------|
//! | `BENCH_ROWS`      | 100000   |
//! | `BENCH_COLUMNS`   | 68       |
//! | `BENCH_SEED`      | entropy  |
//! | `BENCH_LOG_LEVEL` | info     |
//! | `BENCH_LOG_FILE`  | none     |

use log::{warn, LevelFilter};
use std::env;

pub const DEFAULT_ROWS: u32 = 100_000;
pub const DEFAULT_COLUMNS: usize = 68;

/// Everything a benchmark run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Executions of the timed INSERT statement.
    pub rows: u32,
    /// Number of `value_N` TEXT columns.
    pub columns: usize,
    pub table: String,
    /// Pool content when the fixed INSERT and SELECT are built.
    pub initial_value: String,
    /// Values added to the pool afterwards.
    pub extra_values: Vec<String>,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
    pub log_file: Option<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            table: crate::query::DEFAULT_TABLE.to_string(),
            initial_value: "val1".to_string(),
            extra_values: vec!["val2".to_string(), "val3".to_string()],
            seed: None,
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl BenchConfig {
    /// Defaults with `BENCH_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`BenchConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            rows: resolve_parsed(&lookup, "BENCH_ROWS", defaults.rows),
            columns: resolve_parsed(&lookup, "BENCH_COLUMNS", defaults.columns),
            seed: resolve_seed(&lookup),
            log_level: resolve_log_level(&lookup, defaults.log_level),
            log_file: resolve_log_file(&lookup),
            ..defaults
        }
    }
}

fn resolve_parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring {key}={raw:?}: not a valid number, using {default}");
                default
            }
        },
        None => default,
    }
}

fn resolve_seed<F>(lookup: &F) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup("BENCH_SEED")?;
    match raw.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!("Ignoring BENCH_SEED={raw:?}: not a valid number, seeding from entropy");
            None
        }
    }
}

fn resolve_log_level<F>(lookup: &F, default: LevelFilter) -> LevelFilter
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("BENCH_LOG_LEVEL") {
        Some(raw) => bench_core::parse_log_level(&raw).unwrap_or_else(|| {
            warn!("Ignoring BENCH_LOG_LEVEL={raw:?}, using {default}");
            default
        }),
        None => default,
    }
}

fn resolve_log_file<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup("BENCH_LOG_FILE")?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{BenchConfig, DEFAULT_COLUMNS, DEFAULT_ROWS};
    use log::LevelFilter;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> BenchConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BenchConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_describe_full_run() {
        let config = BenchConfig::default();
        assert_eq!(config.rows, 100_000);
        assert_eq!(config.columns, 68);
        assert_eq!(config.table, "test");
        assert_eq!(config.initial_value, "val1");
        assert_eq!(config.extra_values, ["val2", "val3"]);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(from_pairs(&[]), BenchConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = from_pairs(&[
            ("BENCH_ROWS", "250"),
            ("BENCH_COLUMNS", " 4 "),
            ("BENCH_SEED", "42"),
            ("BENCH_LOG_LEVEL", "debug"),
            ("BENCH_LOG_FILE", "bench.log"),
        ]);
        assert_eq!(config.rows, 250);
        assert_eq!(config.columns, 4);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file.as_deref(), Some("bench.log"));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = from_pairs(&[
            ("BENCH_ROWS", "lots"),
            ("BENCH_COLUMNS", "-1"),
            ("BENCH_SEED", "0x2a"),
            ("BENCH_LOG_LEVEL", "loud"),
        ]);
        assert_eq!(config.seed, None);
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.columns, DEFAULT_COLUMNS);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn log_file_none_disables_file_output() {
        assert_eq!(from_pairs(&[("BENCH_LOG_FILE", "none")]).log_file, None);
        assert_eq!(from_pairs(&[("BENCH_LOG_FILE", "  ")]).log_file, None);
    }

    #[test]
    fn same_seed_builds_same_statements() {
        use crate::query::QueryBuilder;
        use crate::values::ValuePool;

        let config = from_pairs(&[("BENCH_SEED", "7"), ("BENCH_COLUMNS", "12")]);
        let seed = config.seed.unwrap();
        let builder = QueryBuilder::new(config.columns);

        let build = || {
            let mut pool = ValuePool::with_seed(config.initial_value.as_str(), seed);
            for value in &config.extra_values {
                pool.push(value.as_str());
            }
            builder.insert(&mut pool)
        };
        assert_eq!(build(), build());
    }
}
