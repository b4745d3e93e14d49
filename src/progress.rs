use is_terminal::IsTerminal;
use std::io::Write;
use std::time::Instant;

/// Per-domain progress for a batch run.
///
/// When stderr is a terminal a single `[done/total] domain` line is redrawn in place,
/// otherwise each step is emitted as a log event.
#[derive(Debug)]
pub struct Progress {
    total: usize,
    done: usize,
    interactive: bool,
    started: Instant,
}

impl Progress {
    #[must_use]
    pub fn new(total: usize, interactive: bool) -> Self {
        Self {
            total,
            done: 0,
            interactive,
            started: Instant::now(),
        }
    }

    /// A progress indicator that redraws in place if stderr is a terminal.
    #[must_use]
    pub fn for_stderr(total: usize) -> Self {
        Self::new(total, std::io::stderr().is_terminal())
    }

    pub fn advance(&mut self, label: &str) {
        self.done += 1;
        if self.interactive {
            let mut stderr = std::io::stderr().lock();
            // Progress output is best effort.
            let _ = write!(stderr, "\r\x1b[K[{}/{}] {label}", self.done, self.total);
            let _ = stderr.flush();
        } else {
            tracing::info!("[{}/{}] {label}", self.done, self.total);
        }
    }

    pub fn finish(&self) {
        if self.interactive {
            eprintln!();
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        tracing::debug!("processed {} of {} in {elapsed:.2}s", self.done, self.total);
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.done
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }
}
