//! Hydration: resolve a persisted squad pilot into a display-ready value.
//!
//! Pure with respect to the card tree: reads fragments, never writes.
//! Failures are per-pilot; one unresolvable pilot never aborts its siblings.

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::data::catalog::{CategoryLoadError, UpgradeCatalog};
use crate::data::faction::Faction;
use crate::data::ship::{load_ship_fragment, ShipFragment, ShipFragmentError};
use crate::data::ship_index::{ShipFileIndex, ShipLookupError};
use crate::data::squad::{PersistedSquad, PersistedSquadPilot};
use crate::data::upgrade::{UpgradeCategory, UpgradeRecord, ALL_CATEGORIES};
use crate::parallel::WorkerPool;

/// One resolved upgrade with the category it was resolved from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedUpgrade {
    pub category: UpgradeCategory,
    pub record: UpgradeRecord,
}

/// A fully hydrated squad pilot. `ship.pilots` holds exactly the one entry
/// matching the persisted pilot id; `upgrades` is concatenated in fixed
/// category order. Owns its data; never aliases into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydratedShipPilot {
    pub ship: ShipFragment,
    pub upgrades: Vec<ResolvedUpgrade>,
    pub points: u32,
    /// Caller-supplied opaque pilot-state reference, carried unmodified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pilot_state: Option<String>,
}

/// Why one pilot failed to hydrate. Messages name the pilot, category, and
/// identifier involved so drifted data can be diagnosed.
#[derive(Debug, Error)]
pub enum HydrationError {
    #[error(transparent)]
    ShipLookup(#[from] ShipLookupError),
    #[error(transparent)]
    ShipFragment(#[from] ShipFragmentError),
    #[error("pilot '{pilot}' not found on ship '{ship_key}'")]
    PilotNotFoundOnShip { pilot: String, ship_key: String },
    #[error(transparent)]
    CategoryUnavailable(#[from] CategoryLoadError),
    #[error("upgrade '{id}' not found in category '{category}'")]
    UpgradeNotFoundInCategory {
        category: UpgradeCategory,
        id: String,
    },
    #[error("unknown faction '{0}'")]
    UnknownFaction(String),
}

/// Per-squad hydration outcome: one result per pilot, in squad order.
#[derive(Debug)]
pub struct SquadHydration {
    pub pilots: Vec<Result<HydratedShipPilot, HydrationError>>,
}

impl SquadHydration {
    pub fn error_count(&self) -> usize {
        self.pilots.iter().filter(|p| p.is_err()).count()
    }
}

/// Resolves persisted references against the built ship-file index and the
/// upgrade catalog. Holds references only; build the index/catalog first.
#[derive(Debug, Clone, Copy)]
pub struct Hydrator<'a> {
    ships: &'a ShipFileIndex,
    upgrades: &'a UpgradeCatalog,
}

impl<'a> Hydrator<'a> {
    pub fn new(ships: &'a ShipFileIndex, upgrades: &'a UpgradeCatalog) -> Self {
        Hydrator { ships, upgrades }
    }

    /// Hydrate one persisted pilot for one faction.
    ///
    /// Resolution order: ship key via the index, fragment decode, pilot
    /// filter, then upgrade resolution per category in fixed declared order.
    /// Fails fast on the first unresolvable reference.
    pub fn hydrate_pilot(
        &self,
        pilot: &PersistedSquadPilot,
        faction: Faction,
        pilot_state: Option<String>,
    ) -> Result<HydratedShipPilot, HydrationError> {
        let file_ref = self.ships.lookup(&pilot.ship, faction)?;
        let mut ship = load_ship_fragment(&file_ref.path())?;

        // Retain the single pilot entry the squad references. At most one
        // match is an upstream invariant on the fragments; zero is an error.
        ship.pilots.retain(|entry| entry.xws == pilot.xws);
        if ship.pilots.is_empty() {
            return Err(HydrationError::PilotNotFoundOnShip {
                pilot: pilot.xws.clone(),
                ship_key: pilot.ship.clone(),
            });
        }

        let mut upgrades = Vec::new();
        for category in ALL_CATEGORIES {
            let Some(ids) = pilot.upgrades.get(&category) else {
                continue;
            };
            if ids.is_empty() {
                continue;
            }
            let records = self.upgrades.load_category(category)?;
            for id in ids {
                let record = records
                    .iter()
                    .find(|r| r.xws == *id)
                    .cloned()
                    .ok_or_else(|| HydrationError::UpgradeNotFoundInCategory {
                        category,
                        id: id.clone(),
                    })?;
                upgrades.push(ResolvedUpgrade { category, record });
            }
        }

        Ok(HydratedShipPilot {
            ship,
            upgrades,
            points: pilot.points,
            pilot_state,
        })
    }

    /// Hydrate every pilot in a squad, collecting one result per pilot.
    /// The squad's faction tag is parsed once; an unknown faction fails
    /// every pilot with [HydrationError::UnknownFaction].
    pub fn hydrate_squad(&self, squad: &PersistedSquad) -> SquadHydration {
        let Some(faction) = Faction::parse(&squad.faction) else {
            let pilots = squad
                .pilots
                .iter()
                .map(|_| Err(HydrationError::UnknownFaction(squad.faction.clone())))
                .collect();
            return SquadHydration { pilots };
        };
        let pilots = squad
            .pilots
            .iter()
            .map(|pilot| self.hydrate_pilot(pilot, faction, pilot.pilot_state.clone()))
            .collect();
        SquadHydration { pilots }
    }

    /// Hydrate a squad's pilots in parallel. Safe once the catalog has been
    /// warmed: hydration touches no shared mutable state beyond the
    /// catalog's internal cache lock.
    pub fn hydrate_squad_parallel(
        &self,
        squad: &PersistedSquad,
        pool: &WorkerPool,
    ) -> SquadHydration {
        let Some(faction) = Faction::parse(&squad.faction) else {
            return self.hydrate_squad(squad);
        };
        let pilots = pool.install(|| {
            squad
                .pilots
                .par_iter()
                .map(|pilot| self.hydrate_pilot(pilot, faction, pilot.pilot_state.clone()))
                .collect()
        });
        SquadHydration { pilots }
    }
}
