//! Card-tree validation: sweeps every ship fragment and upgrade category and
//! reports anything hydration would later trip over (undecodable fragments,
//! duplicate identifiers, ambiguous keys, unavailable categories).

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::data::catalog::UpgradeCatalog;
use crate::data::faction::ALL_FACTIONS;
use crate::data::ship::load_ship_fragment;
use crate::data::ship_index::ShipFileIndex;
use crate::data::upgrade::{UpgradeCategory, ALL_CATEGORIES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    /// What the diagnostic is about: a fragment path, a category tag.
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Validate the whole card tree under `root`. Returns Err only when the
/// root itself is unreadable; everything else lands in the report.
pub fn validate_card_data(root: &Path) -> Result<ValidationReport, String> {
    let index = ShipFileIndex::build(root).map_err(|err| err.to_string())?;
    let mut report = ValidationReport::default();

    for skip in index.skipped_factions() {
        report.push(
            ValidationSeverity::Warning,
            skip.directory.display().to_string(),
            format!("faction directory skipped: {}", skip.reason),
        );
    }
    if index.is_empty() {
        report.push(
            ValidationSeverity::Warning,
            root.display().to_string(),
            "no ship fragments indexed",
        );
    }

    validate_ship_fragments(&index, &mut report);
    validate_upgrade_fragments(root, &mut report);

    Ok(report)
}

fn validate_ship_fragments(index: &ShipFileIndex, report: &mut ValidationReport) {
    let mut keys: Vec<&str> = index.ship_keys().collect();
    keys.sort_unstable();

    for key in keys {
        let refs = index.refs_for_key(key);

        // Two fragments with the same key in the same faction would make
        // every lookup for that pair ambiguous.
        for faction in ALL_FACTIONS {
            let count = refs.iter().filter(|r| r.faction == faction).count();
            if count > 1 {
                report.push(
                    ValidationSeverity::Error,
                    key,
                    format!("{count} fragments share this key for faction {faction}"),
                );
            }
        }

        for file_ref in refs {
            let path = file_ref.path();
            let context = path.display().to_string();
            let fragment = match load_ship_fragment(&path) {
                Ok(fragment) => fragment,
                Err(err) => {
                    report.push(ValidationSeverity::Error, context, err.to_string());
                    continue;
                }
            };
            if fragment.pilots.is_empty() {
                report.push(ValidationSeverity::Warning, context.clone(), "no pilots");
            }
            let mut seen = HashSet::new();
            for pilot in &fragment.pilots {
                if pilot.xws.is_empty() {
                    report.push(
                        ValidationSeverity::Error,
                        context.clone(),
                        format!("pilot '{}' has an empty xws id", pilot.name),
                    );
                } else if !seen.insert(pilot.xws.as_str()) {
                    report.push(
                        ValidationSeverity::Error,
                        context.clone(),
                        format!("duplicate pilot id '{}'", pilot.xws),
                    );
                }
            }
        }
    }
}

fn validate_upgrade_fragments(root: &Path, report: &mut ValidationReport) {
    let catalog = UpgradeCatalog::new(root);
    let mut names: HashMap<String, Vec<UpgradeCategory>> = HashMap::new();

    for category in ALL_CATEGORIES {
        let records = match catalog.load_category(category) {
            Ok(records) => records,
            Err(err) => {
                // Missing file may be a legitimately empty category in a
                // partial tree; malformed JSON is always wrong.
                let severity = match &err.cause {
                    crate::data::catalog::CategoryLoadCause::Unreadable { .. } => {
                        ValidationSeverity::Warning
                    }
                    crate::data::catalog::CategoryLoadCause::Invalid { .. } => {
                        ValidationSeverity::Error
                    }
                };
                report.push(severity, category.tag(), err.to_string());
                continue;
            }
        };
        let mut seen = HashSet::new();
        for record in records.iter() {
            if !seen.insert(record.xws.clone()) {
                report.push(
                    ValidationSeverity::Error,
                    category.tag(),
                    format!("duplicate upgrade id '{}'", record.xws),
                );
            }
            names.entry(record.name.clone()).or_default().push(category);
        }
    }

    // Cross-category name collisions break name-only lookup; identifiers
    // stay usable, so this is informational.
    let mut collisions: Vec<_> = names
        .into_iter()
        .filter(|(_, categories)| categories.len() > 1)
        .collect();
    collisions.sort();
    for (name, categories) in collisions {
        let tags: Vec<&str> = categories.iter().map(|c| c.tag()).collect();
        report.push(
            ValidationSeverity::Info,
            name,
            format!("name appears in categories: {}", tags.join(", ")),
        );
    }
}
