use std::path::PathBuf;

use crate::cleaner::{ItemKind, Source};
use crate::error::ScanError;
use crate::roots::PathRoots;

pub const RECYCLE_BIN_DIR: &str = "$Recycle.Bin";

/// `$Recycle.Bin` on every volume root.
pub struct RecycleBin;

impl Source for RecycleBin {
    fn name(&self) -> &'static str {
        "recycle-bin"
    }

    fn kind(&self) -> ItemKind {
        ItemKind::RecycleBin
    }

    fn targets(&self, roots: &dyn PathRoots) -> Result<Vec<PathBuf>, ScanError> {
        Ok(roots
            .volume_roots()
            .into_iter()
            .map(|volume| volume.join(RECYCLE_BIN_DIR))
            .collect())
    }
}
