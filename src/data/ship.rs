//! Ship fragments: one JSON document per ship variant per faction, holding
//! ship stats, dial, and the pilot roster. Loaded at hydration time via a
//! [ShipFileRef] produced by the ship-file index.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::faction::Faction;

/// Location of one on-disk ship fragment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipFileRef {
    /// File name including the `.json` extension.
    pub file_name: String,
    /// Faction subdirectory the fragment lives in.
    pub directory: PathBuf,
    pub faction: Faction,
}

impl ShipFileRef {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// One stat line on a ship (attack arc, agility, hull, shields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipStat {
    #[serde(rename = "type")]
    pub stat_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc: Option<String>,
    pub value: u32,
}

/// One pilot entry on a ship fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotEntry {
    pub name: String,
    pub xws: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    /// Upgrade slot names this pilot can equip.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
}

/// Decoded ship fragment. `pilots` carries the full roster on disk; after
/// hydration exactly one entry is retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipFragment {
    pub name: String,
    pub xws: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<ShipStat>,
    /// Maneuver dial in compact notation (speed, bearing, difficulty).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dial: Vec<String>,
    pub pilots: Vec<PilotEntry>,
}

/// A ship fragment that could not be read or decoded.
#[derive(Debug, Error)]
pub enum ShipFragmentError {
    #[error("unable to read ship fragment '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse ship fragment '{path}': {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load and decode one ship fragment from disk.
pub fn load_ship_fragment(path: &Path) -> Result<ShipFragment, ShipFragmentError> {
    let raw = fs::read_to_string(path).map_err(|source| ShipFragmentError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ShipFragmentError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}
