//! Card data: ship fragments, upgrade catalog, squad hydration.
//!
//! Layout contract: `<root>/<faction-dir>/<ship>.json` for ship fragments
//! (one subdirectory per faction), `<root>/upgrades/<category>.json` for
//! upgrade fragments. All indexes are built once and read-only afterwards.

pub mod catalog;
pub mod faction;
pub mod hydrate;
pub mod ship;
pub mod ship_index;
pub mod squad;
pub mod upgrade;
pub mod validate;

/// Default card-data root, overridable via `HOLOTABLE_DATA`.
pub const DEFAULT_DATA_ROOT: &str = "data";

/// Card-data root from the environment, falling back to [DEFAULT_DATA_ROOT].
pub fn data_root() -> std::path::PathBuf {
    std::env::var("HOLOTABLE_DATA")
        .unwrap_or_else(|_| DEFAULT_DATA_ROOT.to_string())
        .into()
}
