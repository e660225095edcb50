use std::path::Path;

use crate::error::ConfigError;

pub const MIB: u64 = 1_048_576;

/// Whether anything (including a dangling symlink) sits at `path`.
pub fn path_present(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Remove a file, symlink or directory tree. Symlinks are never followed.
pub fn remove_path(path: &Path) -> Result<(), std::io::Error> {
    let meta = std::fs::symlink_metadata(path)?;
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Parse human-readable size string ("100MB") into bytes.
pub fn parse_size(s: &str) -> Result<u64, ConfigError> {
    let trimmed = s.trim();
    let upper = trimmed.to_ascii_uppercase();
    let (num_str, multiplier) = if let Some(n) = upper.strip_suffix("GB") {
        (n, 1_073_741_824u64)
    } else if let Some(n) = upper.strip_suffix("MB") {
        (n, MIB)
    } else if let Some(n) = upper.strip_suffix("KB") {
        (n, 1_024)
    } else if let Some(n) = upper.strip_suffix('B') {
        (n, 1)
    } else {
        // assume bytes if no suffix
        (upper.as_str(), 1)
    };

    let invalid = |reason: &str| ConfigError::Size {
        value: trimmed.to_string(),
        reason: reason.to_string(),
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| invalid("not a number"))?;

    if !num.is_finite() || num < 0.0 {
        return Err(invalid("size cannot be negative"));
    }

    Ok((num * multiplier as f64) as u64)
}

/// Format byte count as human-readable string.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= MIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else if bytes >= 1_024 {
        format!("{:.2} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Shorten a path for display by replacing the home dir with ~.
pub fn display_path(path: &Path, home: Option<&Path>) -> String {
    match home.and_then(|h| path.strip_prefix(h).ok()) {
        Some(relative) => format!("~/{}", relative.display()),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixed_sizes() {
        assert_eq!(parse_size("1MB").unwrap(), MIB);
        assert_eq!(parse_size("100mb").unwrap(), 100 * MIB);
        assert_eq!(parse_size("1.5 GB").unwrap(), 1_610_612_736);
        assert_eq!(parse_size("512").unwrap(), 512);
        assert_eq!(parse_size("2kb").unwrap(), 2_048);
    }

    #[test]
    fn rejects_garbage_sizes() {
        assert!(parse_size("lots").is_err());
        assert!(parse_size("-5MB").is_err());
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2 * MIB), "2.00 MB");
        assert_eq!(format_size(1_073_741_824), "1.00 GB");
    }

    #[test]
    fn remove_path_handles_files_and_trees() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.tmp");
        std::fs::write(&file, b"x").unwrap();
        let tree = dir.path().join("tree/nested");
        std::fs::create_dir_all(&tree).unwrap();
        std::fs::write(tree.join("b.tmp"), b"y").unwrap();

        remove_path(&file).unwrap();
        remove_path(&dir.path().join("tree")).unwrap();

        assert!(!path_present(&file));
        assert!(!path_present(&dir.path().join("tree")));
        assert!(remove_path(&file).is_err());
    }
}
