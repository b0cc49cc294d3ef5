//! JSON payload builders for the HTTP API. Pure functions over the shared
//! [AppState]; the router maps their results onto HTTP responses.

use std::path::Path;

use serde::Serialize;

use crate::data::catalog::{CategoryLoadError, UpgradeCatalog};
use crate::data::faction::{Faction, ALL_FACTIONS};
use crate::data::hydrate::Hydrator;
use crate::data::ship_index::{ShipFileIndex, ShipIndexError};
use crate::data::squad::parse_squad;
use crate::data::upgrade::{UpgradeCategory, UnknownCategory};

/// Card-data state built once at startup and shared with every request.
#[derive(Debug)]
pub struct AppState {
    pub ships: ShipFileIndex,
    pub upgrades: UpgradeCatalog,
}

impl AppState {
    /// Build the ship index and upgrade catalog from one card-data root.
    /// Skipped faction directories are reported on stderr but non-fatal.
    pub fn load(root: &Path) -> Result<AppState, ShipIndexError> {
        let ships = ShipFileIndex::build(root)?;
        for skip in ships.skipped_factions() {
            eprintln!(
                "warning: skipped faction directory '{}': {}",
                skip.directory.display(),
                skip.reason
            );
        }
        Ok(AppState {
            ships,
            upgrades: UpgradeCatalog::new(root),
        })
    }
}

#[derive(Debug, Serialize)]
struct HealthPayload {
    status: &'static str,
    ship_keys: usize,
    skipped_factions: usize,
}

pub fn health_payload(state: &AppState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&HealthPayload {
        status: "ok",
        ship_keys: state.ships.len(),
        skipped_factions: state.ships.skipped_factions().len(),
    })
}

#[derive(Debug, Serialize)]
struct FactionPayload {
    id: &'static str,
    name: &'static str,
}

pub fn factions_payload() -> Result<String, serde_json::Error> {
    let factions: Vec<FactionPayload> = ALL_FACTIONS
        .into_iter()
        .map(|f| FactionPayload {
            id: f.identifier(),
            name: f.display_name(),
        })
        .collect();
    serde_json::to_string_pretty(&factions)
}

#[derive(Debug, Serialize)]
struct ShipKeyPayload {
    ship_key: String,
    factions: Vec<&'static str>,
}

/// Ship keys with the factions each key is available for, optionally
/// filtered to one faction. Sorted by key for stable output.
pub fn ships_payload(
    state: &AppState,
    faction_filter: Option<&str>,
) -> Result<String, String> {
    let filter = match faction_filter {
        Some(raw) => Some(
            Faction::parse(raw).ok_or_else(|| format!("unknown faction '{raw}'"))?,
        ),
        None => None,
    };

    let mut ships: Vec<ShipKeyPayload> = state
        .ships
        .ship_keys()
        .filter_map(|key| {
            let refs = state.ships.refs_for_key(key);
            let factions: Vec<&'static str> = refs
                .iter()
                .map(|r| r.faction.identifier())
                .filter(|id| filter.map_or(true, |f| f.identifier() == *id))
                .collect();
            if factions.is_empty() {
                return None;
            }
            Some(ShipKeyPayload {
                ship_key: key.to_string(),
                factions,
            })
        })
        .collect();
    ships.sort_by(|a, b| a.ship_key.cmp(&b.ship_key));

    serde_json::to_string_pretty(&ships).map_err(|err| err.to_string())
}

/// Upgrade listing errors keep "unknown category" (router: 404) apart from
/// "fragment unavailable" (router: 500).
#[derive(Debug)]
pub enum UpgradesPayloadError {
    UnknownCategory(UnknownCategory),
    Unavailable(CategoryLoadError),
    Serialize(serde_json::Error),
}

pub fn upgrades_payload(state: &AppState, tag: &str) -> Result<String, UpgradesPayloadError> {
    let category =
        UpgradeCategory::parse(tag).map_err(UpgradesPayloadError::UnknownCategory)?;
    let records = state
        .upgrades
        .load_category(category)
        .map_err(UpgradesPayloadError::Unavailable)?;
    serde_json::to_string_pretty(records.as_ref()).map_err(UpgradesPayloadError::Serialize)
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum PilotOutcomePayload {
    Ok { pilot: crate::data::hydrate::HydratedShipPilot },
    Error { error: String },
}

#[derive(Debug, Serialize)]
struct HydrateResponse {
    faction: String,
    errors: usize,
    pilots: Vec<PilotOutcomePayload>,
}

/// POST /api/hydrate body: a persisted squad JSON document. Returns one
/// ok-or-error entry per pilot; a squad-level parse failure is Err (400).
pub fn hydrate_payload(state: &AppState, body: &str) -> Result<String, String> {
    let squad = parse_squad(body).map_err(|err| err.to_string())?;
    let hydrator = Hydrator::new(&state.ships, &state.upgrades);
    let outcome = hydrator.hydrate_squad(&squad);

    let response = HydrateResponse {
        faction: squad.faction.clone(),
        errors: outcome.error_count(),
        pilots: outcome
            .pilots
            .into_iter()
            .map(|result| match result {
                Ok(pilot) => PilotOutcomePayload::Ok { pilot },
                Err(err) => PilotOutcomePayload::Error {
                    error: err.to_string(),
                },
            })
            .collect(),
    };
    serde_json::to_string_pretty(&response).map_err(|err| err.to_string())
}
