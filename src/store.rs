use std::sync::{Arc, RwLock};

use tracing::debug;
use uuid::Uuid;

use crate::cleaner::ScanReport;

/// Holds the most recent scan report and nothing else.
///
/// Publishing always replaces the current report. There is no history, and a
/// clean request never reads items from here; callers pass the exact items
/// they approved.
#[derive(Debug, Default)]
pub struct ReportStore {
    slot: RwLock<Option<Arc<ScanReport>>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is stored. Returns the shared handle to the new report.
    pub fn publish(&self, report: ScanReport) -> Arc<ScanReport> {
        let report = Arc::new(report);
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.as_ref() {
            debug!(previous = %previous.scan_id, current = %report.scan_id, "replacing scan report");
        }
        *slot = Some(Arc::clone(&report));
        report
    }

    pub fn latest(&self) -> Option<Arc<ScanReport>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The stored report, but only while it is still the one with `scan_id`.
    pub fn get(&self, scan_id: Uuid) -> Option<Arc<ScanReport>> {
        self.latest().filter(|r| r.scan_id == scan_id)
    }
}
