//! Persisted squad representation: the compact JSON document the app stores
//! and the upstream layers hand to the engine as a string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::upgrade::UpgradeCategory;

/// One persisted pilot: references into the card tree, not card data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSquadPilot {
    /// Pilot identifier on the ship fragment.
    pub xws: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ship key, matching the index's normalized file-derived key.
    pub ship: String,
    pub points: u32,
    /// Category tag -> upgrade identifiers. BTreeMap keeps category order
    /// canonical regardless of the document's key order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub upgrades: BTreeMap<UpgradeCategory, Vec<String>>,
    /// Opaque external pilot-state reference; carried through hydration
    /// unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pilot_state: Option<String>,
}

/// A persisted squad: faction tag plus pilot references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSquad {
    /// Faction display name or normalized identifier.
    pub faction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    pub pilots: Vec<PersistedSquadPilot>,
}

#[derive(Debug, Error)]
#[error("unable to parse persisted squad: {source}")]
pub struct SquadParseError {
    #[source]
    pub source: serde_json::Error,
}

/// Decode a persisted squad from its stored JSON string.
pub fn parse_squad(raw: &str) -> Result<PersistedSquad, SquadParseError> {
    serde_json::from_str(raw).map_err(|source| SquadParseError { source })
}
