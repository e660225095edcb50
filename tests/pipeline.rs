use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;
use tidywin::{
    ApprovedItem, CleanError, FixedRoots, ItemKind, ScanStatus, Session, Settings, ValidationError,
};

const MIB: u64 = 1_048_576;

fn write_file(path: &Path, size: u64, age_days: u64) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = File::create(path).unwrap();
    file.set_len(size).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(age_days * 86_400))
        .unwrap();
}

/// A fake machine: home, one temp dir, a system temp dir and one volume.
struct Machine {
    dir: TempDir,
}

impl Machine {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn roots(&self) -> FixedRoots {
        FixedRoots {
            username: Some("tester".into()),
            temp_dirs: vec![self.path("home/AppData/Local/Temp")],
            system_temp: Some(self.path("Windows/Temp")),
            volumes: vec![self.path("C")],
            ..FixedRoots::new(self.path("home"))
        }
    }

    fn session(&self) -> Session {
        Session::new(Arc::new(self.roots()), Settings::default())
    }
}

#[test]
fn scan_then_clean_approved_subset() {
    let m = Machine::new();
    write_file(&m.path("home/AppData/Local/Temp/a.tmp"), 500 * 1024, 0);
    write_file(&m.path("home/AppData/Local/Temp/b.tmp"), 2 * MIB, 0);
    write_file(&m.path("C/$Recycle.Bin/S-1/$R0001.iso"), 3 * MIB, 0);
    let session = m.session();

    let report = session.scan();
    assert_eq!(report.status, ScanStatus::Success);
    assert!(report.items.iter().all(|i| i.size_bytes >= MIB));

    let temp: Vec<_> = report.items_of(ItemKind::TempFile).collect();
    assert_eq!(temp.len(), 1);
    assert_eq!(temp[0].display_name, "b.tmp");
    assert_eq!(temp[0].size_bytes, 2 * MIB);

    // approve only the recycle bin item
    let approved: Vec<ApprovedItem> = report
        .items_of(ItemKind::RecycleBin)
        .map(ApprovedItem::from)
        .collect();
    let outcome = session.clean(&approved).unwrap();

    assert_eq!(outcome.deleted_count, 1);
    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.total_cleaned_size, 3 * MIB);
    assert!(!m.path("C/$Recycle.Bin/S-1/$R0001.iso").exists());
    assert!(m.path("home/AppData/Local/Temp/b.tmp").exists());
}

#[test]
fn documents_item_rejects_batch() {
    let m = Machine::new();
    write_file(&m.path("home/AppData/Local/Temp/x.tmp"), 2 * MIB, 0);
    write_file(&m.path("home/Documents/budget.xlsx"), 2 * MIB, 0);
    let session = m.session();

    let items = vec![
        ApprovedItem {
            kind: ItemKind::TempFile,
            name: "x.tmp".into(),
            path: m.path("home/AppData/Local/Temp/x.tmp"),
            size: 2 * MIB,
        },
        ApprovedItem {
            kind: ItemKind::TempFile,
            name: "budget.xlsx".into(),
            path: m.path("home/Documents/budget.xlsx"),
            size: 2 * MIB,
        },
    ];

    let err = session.clean(&items).unwrap_err();
    let CleanError::Rejected { path, reason } = err;
    assert_eq!(path, m.path("home/Documents/budget.xlsx"));
    assert!(matches!(reason, ValidationError::Forbidden(_)));
    assert!(m.path("home/AppData/Local/Temp/x.tmp").exists());
    assert!(m.path("home/Documents/budget.xlsx").exists());
}

#[test]
fn age_filtered_sources_report_old_files_only() {
    let m = Machine::new();
    write_file(&m.path("Windows/Temp/leftover.dat"), 2 * MIB, 60);
    write_file(&m.path("Windows/Temp/recent.dat"), 2 * MIB, 3);
    let cache = "home/AppData/Local/Microsoft/Edge/User Data/Default/Cache/Cache_Data";
    write_file(&m.path(&format!("{cache}/data_1")), 2 * MIB, 8);
    write_file(&m.path(&format!("{cache}/data_2")), 2 * MIB, 6);

    let report = m.session().scan();

    let remains: Vec<_> = report.items_of(ItemKind::ProgramRemains).collect();
    assert_eq!(remains.len(), 1);
    assert_eq!(remains[0].display_name, "leftover.dat");
    assert!(remains[0].age_days.unwrap() >= 30);

    let caches: Vec<_> = report.items_of(ItemKind::BrowserCache).collect();
    assert_eq!(caches.len(), 1);
    assert_eq!(caches[0].display_name, "data_1");
    assert!(caches[0].age_days.unwrap() >= 7);
}

#[test]
fn rescan_replaces_cached_report() {
    let m = Machine::new();
    write_file(&m.path("home/AppData/Local/Temp/one.tmp"), 2 * MIB, 0);
    let session = m.session();

    let first = session.scan();
    write_file(&m.path("home/AppData/Local/Temp/two.tmp"), 2 * MIB, 0);
    let second = session.scan();

    let latest = session.latest_report().unwrap();
    assert_eq!(latest.scan_id, second.scan_id);
    assert_ne!(first.scan_id, second.scan_id);
    assert!(session.store().get(first.scan_id).is_none());
    assert_eq!(latest.items_of(ItemKind::TempFile).count(), 2);
}

#[test]
fn saved_report_round_trips_into_clean() {
    let m = Machine::new();
    write_file(&m.path("home/AppData/Local/Temp/big.tmp"), 2 * MIB, 0);
    let session = m.session();
    let report = session.scan();

    let saved = serde_json::to_string(&*report).unwrap();
    let items = tidywin::session::parse_approved_items(&saved).unwrap();
    assert_eq!(items.len(), 1);

    let preview = session.preview(&items).unwrap();
    assert_eq!(preview.total_bytes, 2 * MIB);
    assert!(m.path("home/AppData/Local/Temp/big.tmp").exists());

    let outcome = session.clean(&items).unwrap();
    assert_eq!(outcome.deleted_count, 1);

    // the same list again is now stale and refused as a whole
    assert!(session.clean(&items).is_err());
}

#[test]
fn approving_home_directory_keeps_documents() {
    let m = Machine::new();
    write_file(&m.path("home/Documents/taxes.xlsx"), 2 * MIB, 0);
    write_file(&m.path("home/AppData/Local/Temp/x.tmp"), 2 * MIB, 0);
    let session = m.session();

    let items = vec![ApprovedItem {
        kind: ItemKind::TempFile,
        name: "home".into(),
        path: m.path("home"),
        size: 4 * MIB,
    }];

    let err = session.clean(&items).unwrap_err();
    let CleanError::Rejected { reason, .. } = err;
    assert!(matches!(reason, ValidationError::Forbidden(_)));
    assert!(m.path("home/Documents/taxes.xlsx").exists());
}

#[test]
fn dotted_path_into_documents_is_refused() {
    let m = Machine::new();
    write_file(&m.path("home/Documents/taxes.xlsx"), 2 * MIB, 0);
    std::fs::create_dir_all(m.path("home/AppData")).unwrap();
    let session = m.session();

    let items = vec![ApprovedItem {
        kind: ItemKind::TempFile,
        name: "taxes.xlsx".into(),
        path: m.path("home/AppData/../Documents/taxes.xlsx"),
        size: 2 * MIB,
    }];

    assert!(session.clean(&items).is_err());
    assert!(m.path("home/Documents/taxes.xlsx").exists());
}

#[test]
fn file_reported_by_two_sources_is_cleaned_once() {
    let m = Machine::new();
    // user temp is walked by both the temp-file and program-remains sources
    write_file(&m.path("home/AppData/Local/Temp/stale.dat"), 2 * MIB, 60);
    let session = m.session();
    let report = session.scan();
    assert_eq!(report.items.len(), 2);

    let saved = serde_json::to_string(&*report).unwrap();
    let items = tidywin::session::parse_approved_items(&saved).unwrap();
    let outcome = session.clean(&items).unwrap();

    assert_eq!(outcome.deleted_count, 1);
    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.total_cleaned_size, 2 * MIB);
    assert!(!m.path("home/AppData/Local/Temp/stale.dat").exists());
}
