use std::path::PathBuf;

use crate::cleaner::{ItemKind, Source};
use crate::error::ScanError;
use crate::roots::PathRoots;

/// Everything large in the OS and user temp directories.
pub struct TempFiles;

impl Source for TempFiles {
    fn name(&self) -> &'static str {
        "temp-files"
    }

    fn kind(&self) -> ItemKind {
        ItemKind::TempFile
    }

    fn targets(&self, roots: &dyn PathRoots) -> Result<Vec<PathBuf>, ScanError> {
        Ok(roots.temp_dirs())
    }
}
