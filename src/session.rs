use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::classifier::PathClassifier;
use crate::cleaner::{ApprovedItem, CleanOutcome, ScanReport};
use crate::config::Settings;
use crate::error::{CleanError, Result};
use crate::executor::{CleanExecutor, CleanPreview};
use crate::orchestrator::ScanOrchestrator;
use crate::roots::{PathRoots, SystemRoots};
use crate::store::ReportStore;

/// Owns everything one user-facing surface needs: the scan pipeline, the
/// denylist, and the single-slot report store.
pub struct Session {
    orchestrator: ScanOrchestrator,
    classifier: PathClassifier,
    store: Arc<ReportStore>,
}

impl Session {
    pub fn new(roots: Arc<dyn PathRoots>, settings: Settings) -> Self {
        let classifier = PathClassifier::for_roots(roots.as_ref(), &settings.safety.extra_denylist);
        Self {
            orchestrator: ScanOrchestrator::new(roots, settings.scan),
            classifier,
            store: Arc::new(ReportStore::new()),
        }
    }

    /// A session over the live environment.
    pub fn system(settings: Settings) -> Self {
        Self::new(Arc::new(SystemRoots), settings)
    }

    pub fn store(&self) -> &Arc<ReportStore> {
        &self.store
    }

    /// Run a full scan and publish it, replacing the previous report.
    pub fn scan(&self) -> Arc<ScanReport> {
        info!("starting scan");
        self.store.publish(self.orchestrator.run_full_scan())
    }

    pub fn latest_report(&self) -> Option<Arc<ScanReport>> {
        self.store.latest()
    }

    /// Delete exactly `items`, after validating every one of them.
    pub fn clean(&self, items: &[ApprovedItem]) -> std::result::Result<CleanOutcome, CleanError> {
        if let Some(report) = self.store.latest() {
            info!(scan_id = %report.scan_id, items = items.len(), "cleaning approved items");
        }
        CleanExecutor::new(&self.classifier).clean(items)
    }

    pub fn preview(&self, items: &[ApprovedItem]) -> std::result::Result<CleanPreview, CleanError> {
        CleanExecutor::new(&self.classifier).preview(items)
    }
}

/// Read approved items from JSON: either a bare array of items or a saved
/// scan report, in which case all of its items are taken.
pub fn parse_approved_items(json: &str) -> Result<Vec<ApprovedItem>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Input {
        Items(Vec<ApprovedItem>),
        Report(ScanReport),
    }

    Ok(match serde_json::from_str::<Input>(json)? {
        Input::Items(items) => items,
        Input::Report(report) => report.items.iter().map(ApprovedItem::from).collect(),
    })
}

pub fn load_approved_items(path: &Path) -> Result<Vec<ApprovedItem>> {
    let text = std::fs::read_to_string(path)?;
    parse_approved_items(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::{ItemKind, ScanItem};
    use crate::scanner::SkipTally;
    use std::path::PathBuf;

    #[test]
    fn parses_bare_item_list() {
        let json = r#"[{"type":"TEMP_FILES","name":"a.tmp","path":"/tmp/a.tmp","size":5}]"#;
        let items = parse_approved_items(json).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, PathBuf::from("/tmp/a.tmp"));
    }

    #[test]
    fn parses_saved_report() {
        let report = ScanReport::success(
            vec![ScanItem {
                kind: ItemKind::RecycleBin,
                display_name: "$R1.zip".into(),
                absolute_path: PathBuf::from("/C/$Recycle.Bin/$R1.zip"),
                size_bytes: 9,
                age_days: None,
                last_modified: None,
                safe_to_delete: true,
            }],
            SkipTally::default(),
        );
        let json = serde_json::to_string(&report).unwrap();
        let items = parse_approved_items(&json).unwrap();
        assert_eq!(items[0].kind, ItemKind::RecycleBin);
        assert_eq!(items[0].size, 9);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_approved_items(r#"{"nope":1}"#).is_err());
    }
}
