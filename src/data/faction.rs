//! Factions: closed enumeration, display names, and ship-directory naming.
//! A faction's ship fragments live in `<root>/<faction identifier>/`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven playable factions. Declaration order is not significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[serde(rename = "rebelalliance")]
    RebelAlliance,
    #[serde(rename = "galacticempire")]
    GalacticEmpire,
    #[serde(rename = "scumandvillainy")]
    ScumAndVillainy,
    #[serde(rename = "resistance")]
    Resistance,
    #[serde(rename = "firstorder")]
    FirstOrder,
    #[serde(rename = "galacticrepublic")]
    GalacticRepublic,
    #[serde(rename = "separatistalliance")]
    SeparatistAlliance,
}

pub const ALL_FACTIONS: [Faction; 7] = [
    Faction::RebelAlliance,
    Faction::GalacticEmpire,
    Faction::ScumAndVillainy,
    Faction::Resistance,
    Faction::FirstOrder,
    Faction::GalacticRepublic,
    Faction::SeparatistAlliance,
];

/// Normalize a faction string for lookup: alphanumeric lowercase only.
fn normalize_faction_key(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Faction {
    /// Normalized identifier; also the name of the faction's ship
    /// subdirectory under the card-data root.
    pub fn identifier(&self) -> &'static str {
        match self {
            Faction::RebelAlliance => "rebelalliance",
            Faction::GalacticEmpire => "galacticempire",
            Faction::ScumAndVillainy => "scumandvillainy",
            Faction::Resistance => "resistance",
            Faction::FirstOrder => "firstorder",
            Faction::GalacticRepublic => "galacticrepublic",
            Faction::SeparatistAlliance => "separatistalliance",
        }
    }

    /// Human-readable name as persisted squads carry it.
    pub fn display_name(&self) -> &'static str {
        match self {
            Faction::RebelAlliance => "Rebel Alliance",
            Faction::GalacticEmpire => "Galactic Empire",
            Faction::ScumAndVillainy => "Scum and Villainy",
            Faction::Resistance => "Resistance",
            Faction::FirstOrder => "First Order",
            Faction::GalacticRepublic => "Galactic Republic",
            Faction::SeparatistAlliance => "Separatist Alliance",
        }
    }

    /// Parse either a display name ("Galactic Empire") or an identifier
    /// ("galacticempire"). Returns None for anything unrecognized.
    pub fn parse(value: &str) -> Option<Faction> {
        let normalized = normalize_faction_key(value);
        ALL_FACTIONS
            .into_iter()
            .find(|f| f.identifier() == normalized)
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_display_name_and_identifier() {
        assert_eq!(Faction::parse("Galactic Empire"), Some(Faction::GalacticEmpire));
        assert_eq!(Faction::parse("galacticempire"), Some(Faction::GalacticEmpire));
        assert_eq!(Faction::parse("Scum and Villainy"), Some(Faction::ScumAndVillainy));
        assert_eq!(Faction::parse("first-order"), Some(Faction::FirstOrder));
        assert_eq!(Faction::parse("mandalorians"), None);
    }

    #[test]
    fn identifier_matches_directory_contract() {
        for faction in ALL_FACTIONS {
            let id = faction.identifier();
            assert!(id.chars().all(|c| c.is_ascii_lowercase()), "{id}");
            assert!(!id.contains('-'), "{id}");
        }
    }
}
