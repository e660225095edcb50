use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ScanSettings;
use crate::error::ScanError;
use crate::roots::PathRoots;
use crate::scanner::SkipTally;

/// Which logical source produced an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "TEMP_FILES")]
    TempFile,
    #[serde(rename = "PROGRAM_REMAINS")]
    ProgramRemains,
    #[serde(rename = "BROWSER_CACHE")]
    BrowserCache,
    #[serde(rename = "RECYCLE_BIN")]
    RecycleBin,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::TempFile,
        ItemKind::ProgramRemains,
        ItemKind::BrowserCache,
        ItemKind::RecycleBin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::TempFile => "Temporary Files",
            ItemKind::ProgramRemains => "Program Remains",
            ItemKind::BrowserCache => "Browser Caches",
            ItemKind::RecycleBin => "Recycle Bin",
        }
    }
}

/// One item found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "path")]
    pub absolute_path: PathBuf,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    #[serde(rename = "ageDays", default, skip_serializing_if = "Option::is_none")]
    pub age_days: Option<u64>,
    /// Local calendar date of the last write, alongside `age_days`.
    #[serde(rename = "lastModified", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<NaiveDate>,
    /// Set at discovery; the executor re-verifies instead of trusting it.
    #[serde(rename = "safeToDelete")]
    pub safe_to_delete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanStatus {
    Success,
    Error,
}

/// Aggregate of one scan pass. Immutable once published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub status: ScanStatus,
    pub total_scannable_size: u64,
    pub items: Vec<ScanItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub skipped: SkipTally,
}

impl ScanReport {
    pub fn success(items: Vec<ScanItem>, skipped: SkipTally) -> Self {
        let total_scannable_size = items.iter().map(|i| i.size_bytes).sum();
        Self {
            scan_id: Uuid::new_v4(),
            status: ScanStatus::Success,
            total_scannable_size,
            items,
            error: None,
            skipped,
        }
    }

    /// A failed pass never carries a partial item list.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            scan_id: Uuid::new_v4(),
            status: ScanStatus::Error,
            total_scannable_size: 0,
            items: Vec::new(),
            error: Some(message.into()),
            skipped: SkipTally::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ScanStatus::Success
    }

    pub fn items_of(&self, kind: ItemKind) -> impl Iterator<Item = &ScanItem> {
        self.items.iter().filter(move |i| i.kind == kind)
    }
}

/// An item the client approved for deletion. Unknown fields are ignored so
/// a saved report's items can be passed back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl From<&ScanItem> for ApprovedItem {
    fn from(item: &ScanItem) -> Self {
        Self {
            kind: item.kind,
            name: item.display_name.clone(),
            path: item.absolute_path.clone(),
            size: item.size_bytes,
        }
    }
}

/// Result of one deletion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanOutcome {
    pub message: String,
    pub total_cleaned_size: u64,
    pub deleted_count: usize,
    pub error_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// The trait every scan source implements.
pub trait Source: Send + Sync {
    /// Machine-readable name (e.g. "browser-caches").
    fn name(&self) -> &'static str;

    fn kind(&self) -> ItemKind;

    /// Directories to walk. Entries that do not exist are dropped by the caller.
    fn targets(&self, roots: &dyn PathRoots) -> Result<Vec<PathBuf>, ScanError>;

    /// Only files last modified at least this many days ago are kept.
    fn min_age_days(&self, _settings: &ScanSettings) -> Option<u64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ItemKind, size: u64) -> ScanItem {
        ScanItem {
            kind,
            display_name: "x.tmp".into(),
            absolute_path: PathBuf::from("/tmp/x.tmp"),
            size_bytes: size,
            age_days: None,
            last_modified: None,
            safe_to_delete: true,
        }
    }

    #[test]
    fn success_report_sums_sizes() {
        let report = ScanReport::success(
            vec![item(ItemKind::TempFile, 10), item(ItemKind::RecycleBin, 32)],
            SkipTally::default(),
        );
        assert!(report.is_success());
        assert_eq!(report.total_scannable_size, 42);
        assert_eq!(report.items_of(ItemKind::RecycleBin).count(), 1);
    }

    #[test]
    fn failed_report_is_empty() {
        let report = ScanReport::failed("boom");
        assert_eq!(report.status, ScanStatus::Error);
        assert!(report.items.is_empty());
        assert_eq!(report.total_scannable_size, 0);
        assert_eq!(report.error.as_deref(), Some("boom"));
    }

    #[test]
    fn report_uses_wire_names() {
        let report = ScanReport::success(vec![item(ItemKind::TempFile, 7)], SkipTally::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["totalScannableSize"], 7);
        assert_eq!(json["items"][0]["type"], "TEMP_FILES");
        assert_eq!(json["items"][0]["safeToDelete"], true);
        assert!(json["items"][0].get("ageDays").is_none());
        assert!(json["items"][0].get("lastModified").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn aged_item_carries_modified_date() {
        let aged = ScanItem {
            age_days: Some(40),
            last_modified: NaiveDate::from_ymd_opt(2024, 3, 9),
            ..item(ItemKind::ProgramRemains, 7)
        };
        let json = serde_json::to_value(&aged).unwrap();
        assert_eq!(json["ageDays"], 40);
        assert_eq!(json["lastModified"], "2024-03-09");
    }

    #[test]
    fn approved_item_ignores_scan_only_fields() {
        let json = r#"{"type":"BROWSER_CACHE","name":"f_0001","path":"C:\\cache\\f_0001",
                       "size":2097152,"safeToDelete":true,"ageDays":12}"#;
        let approved: ApprovedItem = serde_json::from_str(json).unwrap();
        assert_eq!(approved.kind, ItemKind::BrowserCache);
        assert_eq!(approved.size, 2_097_152);
    }
}
