//! Batch driver: runs the [`DomainResolver`] over one domain or a file of domains.

use crate::dns::{DomainReport, DomainResolver, RecordSource};
use crate::error::Error;
use crate::progress::Progress;
use crate::record_store::RecordStore;
use std::path::PathBuf;

/// Where the domains to audit come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A single domain.
    Domain(String),
    /// A file with one domain per line.
    File(PathBuf),
}

/// Totals for a run, across all domains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub domains: usize,
    pub written: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn add(&mut self, report: &DomainReport) {
        self.domains += 1;
        self.written += report.written();
        self.failed += report.failed();
    }
}

/// Audit every domain of `input`, writing documents to `store`.
///
/// # Errors
///
/// Returns [`Error::IO`] if a domain list file can't be read. Per-domain failures never
/// end the run, they are counted in the [`BatchSummary`].
pub async fn run<S: RecordSource>(
    resolver: &DomainResolver<S>,
    store: &mut dyn RecordStore,
    input: &Input,
) -> Result<BatchSummary, Error> {
    match input {
        Input::Domain(domain) => {
            let mut summary = BatchSummary::default();
            let report = resolver.audit(domain, store).await;
            summary.add(&report);
            Ok(summary)
        }
        Input::File(path) => {
            let contents = tokio::fs::read_to_string(path).await?;
            let mut progress = Progress::for_stderr(contents.split_whitespace().count());
            tracing::info!(
                "auditing {} domain(s) from {}",
                progress.total(),
                path.display()
            );
            let summary = run_lines(resolver, store, &contents, &mut progress).await;
            progress.finish();
            Ok(summary)
        }
    }
}

/// Audit each non-blank line of `contents` as a domain, advancing `progress` once per line.
pub async fn run_lines<S: RecordSource>(
    resolver: &DomainResolver<S>,
    store: &mut dyn RecordStore,
    contents: &str,
    progress: &mut Progress,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for line in contents.lines() {
        let domain = line.trim().to_lowercase();
        if domain.is_empty() {
            continue;
        }
        let report = resolver.audit(&domain, store).await;
        summary.add(&report);
        progress.advance(&domain);
    }
    summary
}
