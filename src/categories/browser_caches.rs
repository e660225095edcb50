use std::path::{Path, PathBuf};

use crate::cleaner::{ItemKind, Source};
use crate::config::ScanSettings;
use crate::error::ScanError;
use crate::roots::PathRoots;

pub struct BrowserCaches;

impl BrowserCaches {
    /// Chromium browsers keep one cache per profile: Default, Profile 1, ...
    fn chromium_cache_dirs(user_data: &Path) -> Vec<PathBuf> {
        let mut profiles = vec![user_data.join("Default")];
        if let Ok(read_dir) = std::fs::read_dir(user_data) {
            for entry in read_dir.flatten() {
                let name = entry.file_name();
                if name.to_string_lossy().starts_with("Profile ") && entry.path().is_dir() {
                    profiles.push(entry.path());
                }
            }
        }

        profiles
            .into_iter()
            .flat_map(|profile| [profile.join("Cache"), profile.join("Code Cache")])
            .collect()
    }

    fn chrome_cache_dirs(local: &Path) -> Vec<PathBuf> {
        Self::chromium_cache_dirs(&local.join("Google").join("Chrome").join("User Data"))
    }

    fn edge_cache_dirs(local: &Path) -> Vec<PathBuf> {
        Self::chromium_cache_dirs(&local.join("Microsoft").join("Edge").join("User Data"))
    }

    fn firefox_cache_dirs(local: &Path) -> Vec<PathBuf> {
        vec![local.join("Mozilla").join("Firefox").join("Profiles")]
    }
}

impl Source for BrowserCaches {
    fn name(&self) -> &'static str {
        "browser-caches"
    }

    fn kind(&self) -> ItemKind {
        ItemKind::BrowserCache
    }

    fn targets(&self, roots: &dyn PathRoots) -> Result<Vec<PathBuf>, ScanError> {
        let local = roots.local_app_data().ok_or(ScanError::NoHomeDir)?;
        Ok([
            Self::chrome_cache_dirs(&local),
            Self::edge_cache_dirs(&local),
            Self::firefox_cache_dirs(&local),
        ]
        .into_iter()
        .flatten()
        .collect())
    }

    fn min_age_days(&self, settings: &ScanSettings) -> Option<u64> {
        Some(settings.browser_cache_age_days)
    }
}
