//! Upgrade cards: the closed category enumeration and the record schema for
//! one card inside a category fragment.
//!
//! Category declaration order is the display order: hydrated upgrade lists
//! are always concatenated astromech -> cannon -> ... -> turret.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The 21 upgrade categories. Ord follows declaration order, which is the
/// fixed concatenation order for hydration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum UpgradeCategory {
    #[serde(rename = "astromech")]
    Astromech,
    #[serde(rename = "cannon")]
    Cannon,
    #[serde(rename = "cargo")]
    Cargo,
    #[serde(rename = "command")]
    Command,
    #[serde(rename = "configuration")]
    Configuration,
    #[serde(rename = "crew")]
    Crew,
    #[serde(rename = "device")]
    Device,
    #[serde(rename = "forcepower")]
    ForcePower,
    #[serde(rename = "gunner")]
    Gunner,
    #[serde(rename = "hardpoint")]
    Hardpoint,
    #[serde(rename = "illicit")]
    Illicit,
    #[serde(rename = "missile")]
    Missile,
    #[serde(rename = "modification")]
    Modification,
    #[serde(rename = "sensor")]
    Sensor,
    #[serde(rename = "tactical-relay")]
    TacticalRelay,
    #[serde(rename = "talent")]
    Talent,
    #[serde(rename = "team")]
    Team,
    #[serde(rename = "tech")]
    Tech,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "torpedo")]
    Torpedo,
    #[serde(rename = "turret")]
    Turret,
}

/// All categories in declaration (display) order.
pub const ALL_CATEGORIES: [UpgradeCategory; 21] = [
    UpgradeCategory::Astromech,
    UpgradeCategory::Cannon,
    UpgradeCategory::Cargo,
    UpgradeCategory::Command,
    UpgradeCategory::Configuration,
    UpgradeCategory::Crew,
    UpgradeCategory::Device,
    UpgradeCategory::ForcePower,
    UpgradeCategory::Gunner,
    UpgradeCategory::Hardpoint,
    UpgradeCategory::Illicit,
    UpgradeCategory::Missile,
    UpgradeCategory::Modification,
    UpgradeCategory::Sensor,
    UpgradeCategory::TacticalRelay,
    UpgradeCategory::Talent,
    UpgradeCategory::Team,
    UpgradeCategory::Tech,
    UpgradeCategory::Title,
    UpgradeCategory::Torpedo,
    UpgradeCategory::Turret,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown upgrade category '{0}'")]
pub struct UnknownCategory(pub String);

impl UpgradeCategory {
    /// Category tag as persisted squads and fragment paths use it.
    pub fn tag(&self) -> &'static str {
        match self {
            UpgradeCategory::Astromech => "astromech",
            UpgradeCategory::Cannon => "cannon",
            UpgradeCategory::Cargo => "cargo",
            UpgradeCategory::Command => "command",
            UpgradeCategory::Configuration => "configuration",
            UpgradeCategory::Crew => "crew",
            UpgradeCategory::Device => "device",
            UpgradeCategory::ForcePower => "forcepower",
            UpgradeCategory::Gunner => "gunner",
            UpgradeCategory::Hardpoint => "hardpoint",
            UpgradeCategory::Illicit => "illicit",
            UpgradeCategory::Missile => "missile",
            UpgradeCategory::Modification => "modification",
            UpgradeCategory::Sensor => "sensor",
            UpgradeCategory::TacticalRelay => "tactical-relay",
            UpgradeCategory::Talent => "talent",
            UpgradeCategory::Team => "team",
            UpgradeCategory::Tech => "tech",
            UpgradeCategory::Title => "title",
            UpgradeCategory::Torpedo => "torpedo",
            UpgradeCategory::Turret => "turret",
        }
    }

    /// File stem of the category's fragment under `<root>/upgrades/`.
    /// Identity with [tag](Self::tag) except the force-power rename.
    pub fn file_stem(&self) -> &'static str {
        match self {
            UpgradeCategory::ForcePower => "force-power",
            other => other.tag(),
        }
    }

    /// Parse a category tag.
    pub fn parse(tag: &str) -> Result<UpgradeCategory, UnknownCategory> {
        ALL_CATEGORIES
            .into_iter()
            .find(|c| c.tag() == tag)
            .ok_or_else(|| UnknownCategory(tag.to_string()))
    }
}

impl fmt::Display for UpgradeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One upgrade card inside a category fragment. Identity is `xws`, unique
/// within a category but not across categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecord {
    pub name: String,
    pub xws: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Slots the card occupies when equipped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
}
