//! Persisted dashboard document and schema migrations.
//!
//! Documents carry an explicit schema version. Loading runs the migration
//! table step by step from the stored version up to
//! [`CURRENT_SCHEMA_VERSION`]; a step may transform the document or discard
//! it, in which case the compiled-in defaults are used instead.

use crate::layout::ResponsiveLayouts;
use crate::widget::Widget;
use serde::{Deserialize, Serialize};

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// The `{widgets, layouts}` pair as stored per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedDashboard {
    /// Absent in documents written before versioning, which read as 0.
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub widgets: Vec<Widget>,
    #[serde(default)]
    pub layouts: ResponsiveLayouts,
}

impl PersistedDashboard {
    /// A document at the current schema version.
    pub fn new(widgets: Vec<Widget>, layouts: ResponsiveLayouts) -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            widgets,
            layouts,
        }
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Outcome of migrating a loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// The document is usable at the current version.
    Current(PersistedDashboard),
    /// The document was discarded; use the defaults.
    Reset,
}

/// One migration step: the document at the next version, or `None` to
/// discard it.
type MigrationFn = fn(PersistedDashboard) -> Option<PersistedDashboard>;

/// Migration from each older version to the next one.
const MIGRATIONS: &[(u32, MigrationFn)] = &[
    // Unversioned layouts predate the per-breakpoint map.
    (0, discard),
    // Version 1 stored a fixed widget list without ids.
    (1, discard),
    // Version 2 layouts lack the widget set added in version 3.
    (2, discard),
];

fn discard(_: PersistedDashboard) -> Option<PersistedDashboard> {
    None
}

/// Bring a loaded document up to the current schema version.
pub fn migrate(document: PersistedDashboard) -> Migration {
    run_migrations(document, MIGRATIONS, CURRENT_SCHEMA_VERSION)
}

fn run_migrations(
    mut document: PersistedDashboard,
    migrations: &[(u32, MigrationFn)],
    current: u32,
) -> Migration {
    while document.version < current {
        let from = document.version;
        let Some((_, step)) = migrations.iter().find(|(version, _)| *version == from) else {
            log::warn!("No migration from schema version {}, using defaults", from);
            return Migration::Reset;
        };
        match step(document) {
            Some(next) if next.version > from => document = next,
            Some(_) => {
                log::warn!("Migration from schema version {} did not advance, using defaults", from);
                return Migration::Reset;
            }
            None => {
                log::info!("Discarding layout stored with schema version {}", from);
                return Migration::Reset;
            }
        }
    }

    if document.version > current {
        log::warn!(
            "Layout was stored with newer schema version {} (current {}), loading best-effort",
            document.version,
            current
        );
    }
    Migration::Current(document)
}
