//! Benchmark driver: runs the insert/select scenario against one in-memory
//! SQLite connection.
//!
//! Stages run strictly in order and the first engine error aborts the run:
//!
//! 1. connect (in-memory) and create the table
//! 2. build the fixed INSERT and SELECT while the pool holds a single value,
//!    so the SELECT is guaranteed to match the fixed row
//! 3. grow the pool, build a second INSERT and execute it `rows` times, then
//!    execute the fixed INSERT once (timed as "Insertion")
//! 4. run the fixed SELECT and print every row (timed as "Select")
//! 5. count rows, drop the table
//!
//! [`run_benchmark`] wraps a full run with the banner, the summary and the
//! final status line, and turns the first error into the terminal
//! `SQLite exception: ...` line.

use crate::config::BenchConfig;
use crate::query::QueryBuilder;
use crate::report::RunReport;
use crate::timer::measure;
use crate::values::ValuePool;
use anyhow::{Context, Result};
use log::{debug, error, info};
use rusqlite::Connection;
use std::fmt;
use std::io::Write;
use std::process::ExitCode;

pub const SUCCESS_LINE: &str = "everything ok, quitting";
pub const FAILURE_PREFIX: &str = "SQLite exception: ";

/// Driver stages, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    CreateTable,
    Insert,
    Select,
    CountRows,
    DropTable,
}

impl Stage {
    fn failed(self) -> String {
        format!("{self} failed")
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Connect => "connect",
            Stage::CreateTable => "create table",
            Stage::Insert => "insert",
            Stage::Select => "select",
            Stage::CountRows => "count rows",
            Stage::DropTable => "drop table",
        };
        f.write_str(name)
    }
}

/// Open an in-memory database tuned for the benchmark.
pub fn open_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory().with_context(|| Stage::Connect.failed())?;
    configure_connection(&conn).with_context(|| Stage::Connect.failed())?;
    Ok(conn)
}

/// Nothing touches disk, so durability settings are irrelevant here.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA synchronous = OFF;
         PRAGMA temp_store = MEMORY;",
    )?;
    Ok(())
}

/// Engine and wrapper version lines printed before a run.
pub fn print_banner(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        out,
        "SQLite3 version {} ({})",
        rusqlite::version(),
        rusqlite::version_number()
    )?;
    writeln!(
        out,
        "rusqlite wrapper, sqlite-bench {}",
        env!("CARGO_PKG_VERSION")
    )
}

pub struct BenchmarkDriver<'a> {
    config: &'a BenchConfig,
    pool: ValuePool,
    builder: QueryBuilder,
}

impl<'a> BenchmarkDriver<'a> {
    pub fn new(config: &'a BenchConfig) -> Self {
        let pool = match config.seed {
            Some(seed) => ValuePool::with_seed(config.initial_value.as_str(), seed),
            None => ValuePool::new(config.initial_value.as_str()),
        };
        Self {
            config,
            pool,
            builder: QueryBuilder::with_table(config.table.as_str(), config.columns),
        }
    }

    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    pub fn pool(&self) -> &ValuePool {
        &self.pool
    }

    /// Full run on a fresh in-memory connection. Writes the timed blocks and
    /// the selected rows to `out`.
    pub fn run(&mut self, out: &mut dyn Write) -> Result<RunReport> {
        let conn = open_connection()?;
        info!("Opened in-memory database");
        self.run_on(&conn, out)
    }

    /// Runs every stage after connect on a caller-provided connection.
    pub fn run_on(&mut self, conn: &Connection, out: &mut dyn Write) -> Result<RunReport> {
        let mut report = RunReport {
            columns: self.builder.columns(),
            ..RunReport::default()
        };

        conn.execute_batch(&self.builder.create_table())
            .with_context(|| Stage::CreateTable.failed())?;
        info!(
            "Created table {} with {} value columns",
            self.builder.table(),
            self.builder.columns()
        );

        // Single value in the pool: the SELECT below matches this INSERT exactly.
        let fixed_insert = self.builder.insert(&mut self.pool);
        let fixed_select = self.builder.select(&mut self.pool);

        for value in &self.config.extra_values {
            self.pool.push(value.as_str());
        }
        debug!("Value pool grown to {:?}", self.pool.values());

        let insert = self.builder.insert(&mut self.pool);
        let rows = self.config.rows;
        let (inserts, insertion) = measure("Insertion", out, |_| {
            for _ in 0..rows {
                conn.execute(&insert, [])
                    .with_context(|| Stage::Insert.failed())?;
            }
            conn.execute(&fixed_insert, [])
                .with_context(|| Stage::Insert.failed())?;
            Ok(u64::from(rows) + 1)
        })?;
        report.inserts = inserts;
        report.insertion = insertion;
        info!(
            "Inserted {} rows in {:.3}s",
            inserts,
            insertion.as_secs_f64()
        );

        let with_value = self.builder.columns() > 0;
        let (selected, select) = measure("Select", out, |out| {
            select_rows(conn, &fixed_select, with_value, out)
                .with_context(|| Stage::Select.failed())
        })?;
        report.selected_rows = selected;
        report.select = select;
        info!(
            "Select returned {} rows in {:.6}s",
            selected,
            select.as_secs_f64()
        );

        report.table_rows = conn
            .query_row(&self.builder.count_rows(), [], |row| row.get::<_, i64>(0))
            .with_context(|| Stage::CountRows.failed())? as u64;

        conn.execute_batch(&self.builder.drop_table())
            .with_context(|| Stage::DropTable.failed())?;
        info!("Dropped table {}", self.builder.table());

        Ok(report)
    }
}

/// How a full run ended.
#[derive(Debug)]
pub enum Outcome {
    Completed(RunReport),
    Aborted(anyhow::Error),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Completed(_) => ExitCode::SUCCESS,
            Outcome::Aborted(_) => ExitCode::FAILURE,
        }
    }
}

/// Banner, driver run and summary, ending with either the success line or
/// `SQLite exception: <error chain>` as the last line written to `out`.
pub fn run_benchmark(config: &BenchConfig, out: &mut dyn Write) -> Outcome {
    match run_and_summarize(config, out) {
        Ok(report) => Outcome::Completed(report),
        Err(e) => {
            error!("Benchmark aborted: {e:#}");
            let _ = writeln!(out, "{FAILURE_PREFIX}{e:#}");
            Outcome::Aborted(e)
        }
    }
}

fn run_and_summarize(config: &BenchConfig, out: &mut dyn Write) -> Result<RunReport> {
    print_banner(out)?;
    let report = BenchmarkDriver::new(config).run(out)?;
    if !report.row_count_consistent() {
        error!(
            "Expected {} rows in table, found {}",
            report.inserts, report.table_rows
        );
    }
    report.print_summary(out)?;
    writeln!(out, "{SUCCESS_LINE}")?;
    Ok(report)
}

/// Streams `row (<id>, "<value_0>")` for every result row; returns the row count.
fn select_rows(
    conn: &Connection,
    sql: &str,
    with_value: bool,
    out: &mut dyn Write,
) -> Result<u64> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut count = 0u64;
    while let Some(row) = rows.next()? {
        let id: i64 = row.get(0)?;
        if with_value {
            let value: String = row.get(1)?;
            writeln!(out, "row ({id}, \"{value}\")")?;
        } else {
            writeln!(out, "row ({id})")?;
        }
        count += 1;
    }
    Ok(count)
}
