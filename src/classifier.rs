use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::{CleanError, ValidationError};
use crate::roots::PathRoots;
use crate::utils;

/// Locations that must never be deleted. `{username}` is resolved at runtime.
const PROTECTED_TEMPLATES: &[&str] = &[
    r"C:\Windows\System32",
    r"C:\Program Files",
    r"C:\Program Files (x86)",
    r"C:\Users\{username}\Documents",
    r"C:\Users\{username}\Desktop",
    r"C:\Users\{username}\Pictures",
    r"C:\Users\{username}\Videos",
    r"C:\Users\{username}\Music",
];

/// User-data folders, also protected relative to the real home directory.
const USER_FOLDERS: &[&str] = &["Documents", "Desktop", "Pictures", "Videos", "Music"];

#[derive(Debug, Clone)]
struct DenyEntry {
    display: String,
    needle: String,
}

impl DenyEntry {
    /// `haystack` lies inside this entry, or is one of its ancestors and
    /// removing it would take the entry along.
    fn covers(&self, haystack: &str) -> bool {
        if haystack.contains(&self.needle) {
            return true;
        }
        let dir = haystack.trim_end_matches('\\');
        self.needle.starts_with(dir) && self.needle[dir.len()..].starts_with('\\')
    }
}

/// Lowercase and unify separators so `C:/Users` and `c:\users` compare equal.
/// The verbatim `\\?\` prefix that `canonicalize` adds on Windows is dropped.
fn normalize(path: &str) -> String {
    let unified = path.replace('/', "\\").to_lowercase();
    match unified.strip_prefix(r"\\?\") {
        Some(rest) => rest.to_string(),
        None => unified,
    }
}

/// Fold `.` and `..` without touching the filesystem.
fn fold_dots(path: &Path) -> PathBuf {
    let mut folded = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other),
        }
    }
    folded
}

/// Every spelling of `path` the denylist is matched against: the folded
/// form, and the real location when the parent directory resolves.
fn match_forms(path: &Path) -> Vec<String> {
    let mut forms = vec![normalize(&fold_dots(path).to_string_lossy())];
    let resolved = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent.canonicalize().ok().map(|p| p.join(name)),
        _ => path.canonicalize().ok(),
    };
    if let Some(real) = resolved {
        forms.push(normalize(&real.to_string_lossy()));
    }
    forms
}

/// Decides whether a path is off limits. Never modifies the filesystem.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    entries: Vec<DenyEntry>,
}

impl PathClassifier {
    /// A classifier over exactly these denylist entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(Into::into)
            .filter(|e| !e.trim().is_empty())
            .map(|display| DenyEntry {
                needle: normalize(&display),
                display,
            })
            .collect();
        Self { entries }
    }

    /// The built-in denylist resolved against `roots`, plus `extra` entries.
    pub fn for_roots(roots: &dyn PathRoots, extra: &[String]) -> Self {
        let username = roots.username();
        let mut entries = Vec::new();

        let templates = PROTECTED_TEMPLATES
            .iter()
            .map(|t| t.to_string())
            .chain(extra.iter().cloned());
        for template in templates {
            if !template.contains("{username}") {
                entries.push(template);
                continue;
            }
            match &username {
                Some(name) => entries.push(template.replace("{username}", name)),
                None => warn!(entry = %template, "username unknown, entry covered by home folders only"),
            }
        }

        if let Some(home) = roots.home_dir() {
            for folder in USER_FOLDERS {
                entries.push(home.join(folder).to_string_lossy().into_owned());
            }
        }

        Self::new(entries)
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.display.as_str())
    }

    /// The first denylist entry `path` falls under or would remove, if any.
    /// `..` segments and symlinked parents are resolved before matching.
    pub fn forbidden_match(&self, path: &Path) -> Option<&str> {
        let forms = match_forms(path);
        self.entries
            .iter()
            .find(|e| forms.iter().any(|f| e.covers(f)))
            .map(|e| e.display.as_str())
    }

    pub fn is_forbidden(&self, path: &Path) -> bool {
        self.forbidden_match(path).is_some()
    }

    /// Absolute and not forbidden. The path itself need not exist.
    pub fn check_location(&self, path: &Path) -> Result<(), ValidationError> {
        if !path.is_absolute() {
            return Err(ValidationError::NotAbsolute);
        }
        if let Some(entry) = self.forbidden_match(path) {
            return Err(ValidationError::Forbidden(entry.to_string()));
        }
        Ok(())
    }

    /// Absolute, not forbidden, and currently present on disk.
    pub fn check(&self, path: &Path) -> Result<(), ValidationError> {
        self.check_location(path)?;
        if !utils::path_present(path) {
            return Err(ValidationError::Missing);
        }
        Ok(())
    }

    pub fn is_valid_for_deletion(&self, path: &Path) -> bool {
        self.check(path).is_ok()
    }

    /// All-or-nothing: the first failing path rejects the whole batch.
    pub fn validate_batch<'a, I>(&self, paths: I) -> Result<(), CleanError>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        Self::first_failure(paths, |p| self.check(p))
    }

    /// Like [`validate_batch`](Self::validate_batch) but ignores existence.
    pub fn validate_locations<'a, I>(&self, paths: I) -> Result<(), CleanError>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        Self::first_failure(paths, |p| self.check_location(p))
    }

    fn first_failure<'a, I, F>(paths: I, check: F) -> Result<(), CleanError>
    where
        I: IntoIterator<Item = &'a Path>,
        F: Fn(&Path) -> Result<(), ValidationError>,
    {
        for path in paths {
            if let Err(reason) = check(path) {
                return Err(CleanError::Rejected {
                    path: path.to_path_buf(),
                    reason,
                });
            }
        }
        Ok(())
    }
}
