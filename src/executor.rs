use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classifier::PathClassifier;
use crate::cleaner::{ApprovedItem, CleanOutcome};
use crate::error::{CleanError, ValidationError};
use crate::utils;

/// What a clean would free, without deleting anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanPreview {
    pub item_count: usize,
    pub total_bytes: u64,
}

/// Deletes approved items one by one, tolerating per-item failure.
pub struct CleanExecutor<'a> {
    classifier: &'a PathClassifier,
}

impl<'a> CleanExecutor<'a> {
    pub fn new(classifier: &'a PathClassifier) -> Self {
        Self { classifier }
    }

    fn paths(items: &[ApprovedItem]) -> impl Iterator<Item = &Path> {
        items.iter().map(|i| i.path.as_path())
    }

    /// First occurrence of each path. One file can be reported by two sources.
    fn unique(items: &[ApprovedItem]) -> Vec<&ApprovedItem> {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.path.as_path()) {
                unique.push(item);
            }
        }
        unique
    }

    /// Every item must be absolute, outside the denylist, and present.
    pub fn validate(&self, items: &[ApprovedItem]) -> Result<(), CleanError> {
        self.classifier.validate_batch(Self::paths(items))
    }

    pub fn preview(&self, items: &[ApprovedItem]) -> Result<CleanPreview, CleanError> {
        self.validate(items)?;
        let unique = Self::unique(items);
        Ok(CleanPreview {
            item_count: unique.len(),
            total_bytes: unique.iter().map(|i| i.size).sum(),
        })
    }

    /// Validate the whole batch, then delete. A single invalid item means
    /// nothing is deleted.
    pub fn clean(&self, items: &[ApprovedItem]) -> Result<CleanOutcome, CleanError> {
        if let Err(e) = self.validate(items) {
            warn!(error = %e, items = items.len(), "clean batch rejected");
            return Err(e);
        }
        self.execute(items)
    }

    /// Delete each item independently.
    ///
    /// Relative or denylisted paths still void the whole batch. Repeated
    /// paths are removed once. Items that vanished since validation count as
    /// errors, and a failed removal never stops the rest of the batch.
    pub fn execute(&self, items: &[ApprovedItem]) -> Result<CleanOutcome, CleanError> {
        self.classifier.validate_locations(Self::paths(items))?;

        let unique = Self::unique(items);
        if unique.len() < items.len() {
            debug!(duplicates = items.len() - unique.len(), "dropped repeated paths");
        }

        let mut outcome = CleanOutcome::default();
        for item in unique {
            match self.remove_one(item) {
                Ok(()) => {
                    debug!(path = %item.path.display(), size = item.size, "deleted");
                    outcome.deleted_count += 1;
                    outcome.total_cleaned_size += item.size;
                }
                Err(reason) => {
                    warn!(path = %item.path.display(), error = %reason, "could not delete");
                    outcome.error_count += 1;
                    outcome.errors.push(format!("{}: {reason}", item.path.display()));
                }
            }
        }

        outcome.message = summary(&outcome);
        info!(
            deleted = outcome.deleted_count,
            errors = outcome.error_count,
            freed = %utils::format_size(outcome.total_cleaned_size),
            "clean finished"
        );
        Ok(outcome)
    }

    fn remove_one(&self, item: &ApprovedItem) -> Result<(), RemoveError> {
        // Re-checked right before removal; validation may be stale by now.
        self.classifier.check(&item.path).map_err(RemoveError::Invalid)?;
        utils::remove_path(&item.path).map_err(RemoveError::Io)
    }
}

#[derive(Debug, thiserror::Error)]
enum RemoveError {
    #[error("{0}")]
    Invalid(ValidationError),
    #[error("{0}")]
    Io(std::io::Error),
}

fn summary(outcome: &CleanOutcome) -> String {
    let freed = utils::format_size(outcome.total_cleaned_size);
    if outcome.error_count == 0 {
        format!("Deleted {} item(s), {freed} freed.", outcome.deleted_count)
    } else {
        format!(
            "Deleted {} item(s), {freed} freed; {} item(s) could not be deleted.",
            outcome.deleted_count, outcome.error_count
        )
    }
}
