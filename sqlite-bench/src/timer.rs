//! Wall-clock timing of named tasks with BEGIN/END report lines.

use std::io::Write;
use std::time::{Duration, Instant};

/// An open timing interval. Writes `<task> - BEGIN` on start and
/// `<task> - END Elapsed seconds: <secs>` on stop.
#[derive(Debug)]
pub struct ElapsedTimer {
    task: String,
    begin: Instant,
}

impl ElapsedTimer {
    pub fn start(task: impl Into<String>, out: &mut dyn Write) -> std::io::Result<Self> {
        let task = task.into();
        writeln!(out, "{task} - BEGIN")?;
        Ok(Self {
            task,
            begin: Instant::now(),
        })
    }

    pub fn stop(self, out: &mut dyn Write) -> std::io::Result<Duration> {
        let elapsed = self.begin.elapsed();
        writeln!(
            out,
            "{} - END Elapsed seconds: {}",
            self.task,
            elapsed.as_secs_f64()
        )?;
        Ok(elapsed)
    }
}

/// Runs `f` between a BEGIN and an END line. The END line is written whether
/// `f` succeeds or fails; `f`'s error takes precedence over a write error.
pub fn measure<T, F>(task: &str, out: &mut dyn Write, f: F) -> anyhow::Result<(T, Duration)>
where
    F: FnOnce(&mut dyn Write) -> anyhow::Result<T>,
{
    let timer = ElapsedTimer::start(task, out)?;
    let result = f(&mut *out);
    let stopped = timer.stop(out);
    let value = result?;
    let elapsed = stopped?;
    log::debug!("{task} took {:.6}s", elapsed.as_secs_f64());
    Ok((value, elapsed))
}
