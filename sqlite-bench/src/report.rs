//! Report module: the measurements of one run and their printed summary.

use std::io::{self, Write};
use std::time::Duration;

/// Results of one benchmark run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub columns: usize,
    /// INSERT executions inside the timed block (timed rows plus the fixed row).
    pub inserts: u64,
    /// Rows counted in the table before teardown.
    pub table_rows: u64,
    /// Rows returned by the fixed SELECT.
    pub selected_rows: u64,
    pub insertion: Duration,
    pub select: Duration,
}

impl RunReport {
    /// Mean latency of one INSERT execution in microseconds.
    pub fn mean_insert_us(&self) -> f64 {
        if self.inserts == 0 {
            return 0.0;
        }
        self.insertion.as_secs_f64() * 1e6 / self.inserts as f64
    }

    pub fn inserts_per_sec(&self) -> f64 {
        let secs = self.insertion.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.inserts as f64 / secs
    }

    pub fn select_us(&self) -> f64 {
        self.select.as_secs_f64() * 1e6
    }

    /// Every INSERT execution produced exactly one row.
    pub fn row_count_consistent(&self) -> bool {
        self.inserts == self.table_rows
    }

    pub fn print_summary(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\n{}", "=".repeat(60))?;
        writeln!(out, "  SQLite In-Memory Insert/Select Summary")?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "  Value columns:   {:>12}", self.columns)?;
        writeln!(out, "  Inserts:         {:>12}", self.inserts)?;
        writeln!(out, "  Rows in table:   {:>12}", self.table_rows)?;
        writeln!(
            out,
            "  Insert total:    {:>12.3}s",
            self.insertion.as_secs_f64()
        )?;
        writeln!(out, "  Insert mean:     {:>12.2}µs", self.mean_insert_us())?;
        writeln!(out, "  Insert rate:     {:>12.0} rows/s", self.inserts_per_sec())?;
        writeln!(out, "  Select:          {:>12.0}µs", self.select_us())?;
        writeln!(out, "  Rows selected:   {:>12}", self.selected_rows)?;
        writeln!(out, "{}", "=".repeat(60))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RunReport;
    use std::time::Duration;

    fn sample_report() -> RunReport {
        RunReport {
            columns: 68,
            inserts: 1_000,
            table_rows: 1_000,
            selected_rows: 1,
            insertion: Duration::from_millis(500),
            select: Duration::from_micros(1_500),
        }
    }

    #[test]
    fn derived_rates() {
        let report = sample_report();
        assert!((report.mean_insert_us() - 500.0).abs() < 1e-6);
        assert!((report.inserts_per_sec() - 2_000.0).abs() < 1e-6);
        assert!((report.select_us() - 1_500.0).abs() < 1e-6);
        assert!(report.row_count_consistent());
    }

    #[test]
    fn empty_report_has_zero_rates() {
        let report = RunReport::default();
        assert_eq!(report.mean_insert_us(), 0.0);
        assert_eq!(report.inserts_per_sec(), 0.0);
    }

    #[test]
    fn summary_mentions_counts() {
        let mut out = Vec::new();
        sample_report().print_summary(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Inserts:"));
        assert!(text.contains("1000"));
        assert!(text.contains("Rows selected:"));
    }
}
