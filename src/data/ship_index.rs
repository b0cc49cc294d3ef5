//! Ship-file index: maps a normalized ship key + faction to the on-disk
//! fragment describing that ship. Built once from the card tree and
//! read-only afterwards; pass by reference to consumers.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::faction::{Faction, ALL_FACTIONS};
use crate::data::ship::ShipFileRef;

/// Known filename/identifier mismatches: file-derived key -> catalog key.
/// Squads reference the catalog identifier, so the index must key by it.
const SHIP_KEY_OVERRIDES: [(&str, &str); 2] = [
    ("tieinterceptor", "tieininterceptor"),
    ("upsilonclassshuttle", "upsilonclasscommandshuttle"),
];

/// Derive the ship key for a fragment file name: strip the `.json`
/// extension, remove hyphens, then apply the override table.
pub fn ship_key_for_file(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
    let key: String = stem.chars().filter(|c| *c != '-').collect();
    for (from, to) in SHIP_KEY_OVERRIDES {
        if key == from {
            return to.to_string();
        }
    }
    key
}

/// A faction subdirectory that exists but could not be enumerated during
/// the build. The build continues without it (partial index). Absent
/// directories are not skips: a tree carrying only some factions is normal.
#[derive(Debug)]
pub struct SkippedFaction {
    pub faction: Faction,
    pub directory: PathBuf,
    pub reason: io::Error,
}

/// Fatal index-build failure: the card-data root itself is unreadable.
#[derive(Debug, Error)]
#[error("unable to read card-data root '{root}': {source}")]
pub struct ShipIndexError {
    pub root: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Lookup outcome when the key + faction pair does not resolve to exactly
/// one fragment. Never silently first-match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShipLookupError {
    #[error("ship '{ship_key}' not found for faction {faction}")]
    NotFound { ship_key: String, faction: Faction },
    #[error("ship '{ship_key}' is ambiguous for faction {faction}: {count} fragments share the key")]
    Ambiguous {
        ship_key: String,
        faction: Faction,
        count: usize,
    },
}

/// Read-only mapping from ship key to the fragments sharing that key across
/// factions. The same key may appear in several factions (e.g. the Z-95 or
/// the firespray); exactly one entry must match at lookup time.
#[derive(Debug, Default)]
pub struct ShipFileIndex {
    entries: HashMap<String, Vec<ShipFileRef>>,
    skipped: Vec<SkippedFaction>,
}

impl ShipFileIndex {
    /// Walk the faction subdirectories under `root` and index every ship
    /// fragment. An unreadable root is fatal; a faction subdirectory that
    /// exists but cannot be read is recorded in
    /// [skipped_factions](Self::skipped_factions) and skipped. Absent
    /// faction subdirectories are ignored.
    pub fn build(root: &Path) -> Result<ShipFileIndex, ShipIndexError> {
        // Validate the root before touching per-faction dirs so a missing
        // tree fails the build instead of producing 7 skips.
        fs::read_dir(root).map_err(|source| ShipIndexError {
            root: root.to_path_buf(),
            source,
        })?;

        let mut index = ShipFileIndex::default();
        for faction in ALL_FACTIONS {
            let directory = root.join(faction.identifier());
            let dir_entries = match fs::read_dir(&directory) {
                Ok(entries) => entries,
                Err(reason) => {
                    // An absent faction directory is a partial tree, not a
                    // failure; only genuine read errors are recorded.
                    if reason.kind() != io::ErrorKind::NotFound {
                        index.skipped.push(SkippedFaction {
                            faction,
                            directory,
                            reason,
                        });
                    }
                    continue;
                }
            };
            for entry in dir_entries.flatten() {
                let file_name = entry.file_name().to_string_lossy().into_owned();
                if !file_name.ends_with(".json") {
                    continue;
                }
                let key = ship_key_for_file(&file_name);
                index.entries.entry(key).or_default().push(ShipFileRef {
                    file_name,
                    directory: directory.clone(),
                    faction,
                });
            }
        }
        Ok(index)
    }

    /// Resolve a ship key for one faction. Zero matches is `NotFound`,
    /// more than one is `Ambiguous`.
    pub fn lookup(&self, ship_key: &str, faction: Faction) -> Result<&ShipFileRef, ShipLookupError> {
        let matches: Vec<&ShipFileRef> = self
            .entries
            .get(ship_key)
            .map(|refs| refs.iter().filter(|r| r.faction == faction).collect())
            .unwrap_or_default();
        match matches.as_slice() {
            [single] => Ok(single),
            [] => Err(ShipLookupError::NotFound {
                ship_key: ship_key.to_string(),
                faction,
            }),
            many => Err(ShipLookupError::Ambiguous {
                ship_key: ship_key.to_string(),
                faction,
                count: many.len(),
            }),
        }
    }

    /// All fragments sharing a ship key, across factions.
    pub fn refs_for_key(&self, ship_key: &str) -> &[ShipFileRef] {
        self.entries
            .get(ship_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every indexed ship key, unordered.
    pub fn ship_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Faction subdirectories that failed to enumerate during the build.
    pub fn skipped_factions(&self) -> &[SkippedFaction] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
