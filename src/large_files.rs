use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

/// Directories to skip during large file scan.
const SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "$Recycle.Bin",
    "System Volume Information",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Every file under `root` of at least `min_bytes`, biggest first.
/// Report only: nothing found here is ever offered for deletion.
pub fn find_large_files(root: &Path, min_bytes: u64) -> Vec<LargeFile> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() > 0 && e.file_type().is_dir() {
                let name = e.file_name().to_string_lossy();
                return !SKIP_DIRS.iter().any(|&skip| name == skip);
            }
            true
        });

    let mut files: Vec<LargeFile> = walker
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let size = e.metadata().ok()?.len();
            (size >= min_bytes).then(|| LargeFile {
                path: e.into_path(),
                size_bytes: size,
            })
        })
        .collect();

    // Sort by size descending, biggest files first
    files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    debug!(root = %root.display(), found = files.len(), "large file search done");
    files
}
