use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{error, info};

use crate::categories;
use crate::cleaner::{ScanReport, Source};
use crate::config::ScanSettings;
use crate::error::ScanError;
use crate::roots::PathRoots;
use crate::scanner::{DirectoryScanner, ScanOutcome, ScanRule};
use crate::utils;

/// Runs every scan source and folds the results into one report.
pub struct ScanOrchestrator {
    roots: Arc<dyn PathRoots>,
    settings: ScanSettings,
    sources: Vec<Box<dyn Source>>,
}

impl ScanOrchestrator {
    pub fn new(roots: Arc<dyn PathRoots>, settings: ScanSettings) -> Self {
        Self {
            roots,
            settings,
            sources: categories::all_sources(),
        }
    }

    /// Replace the default four sources.
    pub fn with_sources(mut self, sources: Vec<Box<dyn Source>>) -> Self {
        self.sources = sources;
        self
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Scan all sources in parallel. Any source failure turns the whole pass
    /// into an error report with no items.
    pub fn run_full_scan(&self) -> ScanReport {
        let scanner = DirectoryScanner::new();
        match self.collect(&scanner) {
            Ok(outcome) => {
                let report = ScanReport::success(outcome.items, outcome.skipped);
                info!(
                    scan_id = %report.scan_id,
                    items = report.items.len(),
                    total = %utils::format_size(report.total_scannable_size),
                    "scan complete"
                );
                report
            }
            Err(e) => {
                error!(error = %e, "scan failed");
                ScanReport::failed(e.to_string())
            }
        }
    }

    fn collect(&self, scanner: &DirectoryScanner) -> Result<ScanOutcome, ScanError> {
        let partials: Vec<Result<ScanOutcome, ScanError>> = self
            .sources
            .par_iter()
            .map(|source| self.scan_source_guarded(source.as_ref(), scanner))
            .collect();

        // Reduce in source order so item order does not depend on scheduling.
        let mut total = ScanOutcome::default();
        for partial in partials {
            let partial = partial?;
            total.items.extend(partial.items);
            total.skipped.merge(partial.skipped);
        }
        Ok(total)
    }

    fn scan_source_guarded(
        &self,
        source: &dyn Source,
        scanner: &DirectoryScanner,
    ) -> Result<ScanOutcome, ScanError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.scan_source(source, scanner))).unwrap_or_else(
            |payload| {
                Err(ScanError::SourcePanicked {
                    source_name: source.name(),
                    message: panic_message(payload.as_ref()),
                })
            },
        )
    }

    /// Walk every existing target of one source. Missing targets contribute nothing.
    pub fn scan_source(
        &self,
        source: &dyn Source,
        scanner: &DirectoryScanner,
    ) -> Result<ScanOutcome, ScanError> {
        let mut rule = ScanRule::new(source.kind(), self.settings.max_depth, self.settings.min_size);
        if let Some(days) = source.min_age_days(&self.settings) {
            rule = rule.older_than(days, scanner.now());
        }

        let targets = categories::existing_unique_dirs(source.targets(self.roots.as_ref())?);

        let mut outcome = ScanOutcome::default();
        for target in &targets {
            let partial = scanner.scan(target, &rule);
            outcome.items.extend(partial.items);
            outcome.skipped.merge(partial.skipped);
        }

        let bytes: u64 = outcome.items.iter().map(|i| i.size_bytes).sum();
        info!(
            source = source.name(),
            dirs = targets.len(),
            items = outcome.items.len(),
            size = %utils::format_size(bytes),
            "source scanned"
        );
        Ok(outcome)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
