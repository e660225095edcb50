use std::path::PathBuf;

use crate::cleaner::{ItemKind, Source};
use crate::config::ScanSettings;
use crate::error::ScanError;
use crate::roots::PathRoots;

/// Files uninstalled programs left behind in temp folders. Only temp
/// folders are searched, never AppData at large.
pub struct ProgramRemains;

impl Source for ProgramRemains {
    fn name(&self) -> &'static str {
        "program-remains"
    }

    fn kind(&self) -> ItemKind {
        ItemKind::ProgramRemains
    }

    fn targets(&self, roots: &dyn PathRoots) -> Result<Vec<PathBuf>, ScanError> {
        let mut dirs = Vec::new();
        if let Some(system) = roots.system_temp_dir() {
            dirs.push(system);
        }
        if let Some(local) = roots.local_app_data() {
            dirs.push(local.join("Temp"));
        }
        Ok(dirs)
    }

    fn min_age_days(&self, settings: &ScanSettings) -> Option<u64> {
        Some(settings.program_remains_age_days)
    }
}
