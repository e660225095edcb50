//! Locate reclaimable disk space and delete only user-approved items.
//!
//! The pipeline is scan → filter → validate → delete:
//! [`ScanOrchestrator`] drives a [`DirectoryScanner`] over the four
//! [`categories`], the resulting [`ScanReport`] is kept in a single-slot
//! [`ReportStore`], and [`CleanExecutor`] deletes the items a client
//! approves after [`PathClassifier`] has cleared every one of them.

pub mod categories;
pub mod classifier;
pub mod cleaner;
pub mod config;
pub mod disk_info;
pub mod error;
pub mod executor;
pub mod large_files;
pub mod orchestrator;
pub mod output;
pub mod roots;
pub mod scanner;
pub mod session;
pub mod store;
pub mod utils;

pub use classifier::PathClassifier;
pub use cleaner::{ApprovedItem, CleanOutcome, ItemKind, ScanItem, ScanReport, ScanStatus, Source};
pub use config::{ScanSettings, Settings};
pub use error::{CleanError, ConfigError, Error, Result, ScanError, ValidationError};
pub use executor::{CleanExecutor, CleanPreview};
pub use orchestrator::ScanOrchestrator;
pub use roots::{FixedRoots, PathRoots, SystemRoots};
pub use scanner::{DirectoryScanner, ScanOutcome, ScanRule, SkipReason, SkipTally};
pub use session::Session;
pub use store::ReportStore;
