mod browser_caches;
mod program_remains;
mod recycle_bin;
mod temp_files;

use std::collections::HashSet;
use std::path::PathBuf;

use crate::cleaner::Source;

pub use browser_caches::BrowserCaches;
pub use program_remains::ProgramRemains;
pub use recycle_bin::RecycleBin;
pub use temp_files::TempFiles;

pub fn all_sources() -> Vec<Box<dyn Source>> {
    vec![
        Box::new(TempFiles),
        Box::new(ProgramRemains),
        Box::new(BrowserCaches),
        Box::new(RecycleBin),
    ]
}

pub fn find_source(name: &str) -> Option<Box<dyn Source>> {
    all_sources().into_iter().find(|s| s.name() == name)
}

pub fn all_source_names() -> Vec<&'static str> {
    all_sources().iter().map(|s| s.name()).collect()
}

/// Keep absolute directories that exist, dropping later aliases of the
/// same directory (e.g. `TEMP` and `TMP` pointing at one place).
pub fn existing_unique_dirs(candidates: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|p| p.is_absolute() && p.is_dir())
        .filter(|p| {
            let key = std::fs::canonicalize(p).unwrap_or_else(|_| p.clone());
            seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_cover_every_kind_once() {
        let kinds: Vec<_> = all_sources().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, crate::cleaner::ItemKind::ALL.to_vec());
        assert_eq!(
            all_source_names(),
            vec!["temp-files", "program-remains", "browser-caches", "recycle-bin"]
        );
        assert!(find_source("recycle-bin").is_some());
        assert!(find_source("xcode").is_none());
    }

    #[test]
    fn dedup_drops_aliases_and_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        std::fs::create_dir(&a).unwrap();
        let alias = dir.path().join("a").join("..").join("a");

        let kept = existing_unique_dirs(vec![
            a.clone(),
            alias,
            dir.path().join("missing"),
            PathBuf::from("relative"),
            a.clone(),
        ]);
        assert_eq!(kept, vec![a]);
    }
}
