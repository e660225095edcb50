use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::cleaner::{ItemKind, ScanItem};

const SECS_PER_DAY: u64 = 86_400;

/// What a single walk keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRule {
    pub kind: ItemKind,
    /// Deepest directory level (relative to the root) whose files are examined.
    pub max_depth: usize,
    pub min_size_bytes: u64,
    /// Files modified after this instant are rejected.
    pub cutoff: Option<SystemTime>,
}

impl ScanRule {
    pub fn new(kind: ItemKind, max_depth: usize, min_size_bytes: u64) -> Self {
        Self {
            kind,
            max_depth,
            min_size_bytes,
            cutoff: None,
        }
    }

    /// Keep only files at least `days` old as seen from `now`.
    pub fn older_than(mut self, days: u64, now: SystemTime) -> Self {
        let cutoff = now
            .checked_sub(Duration::from_secs(days.saturating_mul(SECS_PER_DAY)))
            .unwrap_or(SystemTime::UNIX_EPOCH);
        self.cutoff = Some(cutoff);
        self
    }
}

/// Why one walk entry did not become an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooSmall(u64),
    TooRecent,
    /// Permission denied, vanished mid-walk, unreadable metadata.
    Inaccessible(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipTally {
    pub too_small: usize,
    pub too_recent: usize,
    pub inaccessible: usize,
}

impl SkipTally {
    pub fn record(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::TooSmall(_) => self.too_small += 1,
            SkipReason::TooRecent => self.too_recent += 1,
            SkipReason::Inaccessible(_) => self.inaccessible += 1,
        }
    }

    pub fn merge(&mut self, other: SkipTally) {
        self.too_small += other.too_small;
        self.too_recent += other.too_recent;
        self.inaccessible += other.inaccessible;
    }

    pub fn total(&self) -> usize {
        self.too_small + self.too_recent + self.inaccessible
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub items: Vec<ScanItem>,
    pub skipped: SkipTally,
}

/// Bounded-depth walker applying size and age filters.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryScanner {
    now: SystemTime,
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryScanner {
    pub fn new() -> Self {
        Self::at(SystemTime::now())
    }

    /// Compute ages relative to `now` instead of the wall clock.
    pub fn at(now: SystemTime) -> Self {
        Self { now }
    }

    pub fn now(&self) -> SystemTime {
        self.now
    }

    /// Walk `root` and return every file that passes `rule`, in walk order.
    /// A bad entry is counted and skipped, never fatal.
    pub fn scan(&self, root: &Path, rule: &ScanRule) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        // Files directly in the root sit at walkdir depth 1 but directory level 0.
        let walker = WalkDir::new(root)
            .follow_links(false)
            .max_depth(rule.max_depth.saturating_add(1));

        for entry in walker {
            let verdict = match entry {
                Ok(entry) => match self.evaluate(&entry, rule) {
                    Some(v) => v,
                    None => continue,
                },
                Err(e) => Err(SkipReason::Inaccessible(e.to_string())),
            };

            match verdict {
                Ok(item) => outcome.items.push(item),
                Err(reason) => {
                    trace!(?reason, "skipped entry");
                    outcome.skipped.record(&reason);
                }
            }
        }

        debug!(
            root = %root.display(),
            kind = ?rule.kind,
            found = outcome.items.len(),
            skipped = outcome.skipped.total(),
            "scanned directory"
        );
        outcome
    }

    /// `None` for anything that is not a regular file.
    fn evaluate(&self, entry: &DirEntry, rule: &ScanRule) -> Option<Result<ScanItem, SkipReason>> {
        if !entry.file_type().is_file() {
            return None;
        }

        // Single metadata call, size and timestamps at once
        let meta = match entry.metadata() {
            Ok(m) => m,
            Err(e) => return Some(Err(SkipReason::Inaccessible(e.to_string()))),
        };

        let size = meta.len();
        if size < rule.min_size_bytes {
            return Some(Err(SkipReason::TooSmall(size)));
        }

        let mut age_days = None;
        let mut last_modified = None;
        if let Some(cutoff) = rule.cutoff {
            let modified = match meta.modified() {
                Ok(t) => t,
                Err(e) => return Some(Err(SkipReason::Inaccessible(e.to_string()))),
            };
            if modified > cutoff {
                return Some(Err(SkipReason::TooRecent));
            }
            let age = self.now.duration_since(modified).unwrap_or_default();
            age_days = Some(age.as_secs() / SECS_PER_DAY);
            last_modified = Some(DateTime::<Local>::from(modified).date_naive());
        }

        Some(Ok(ScanItem {
            kind: rule.kind,
            display_name: entry.file_name().to_string_lossy().into_owned(),
            absolute_path: entry.path().to_path_buf(),
            size_bytes: size,
            age_days,
            last_modified,
            safe_to_delete: true,
        }))
    }
}
