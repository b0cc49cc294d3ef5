//! holotable: card-data resolution engine for an X-Wing squad builder.
//!
//! Resolves persisted squads (ship keys, pilot ids, upgrade ids) against the
//! on-disk card tree: one JSON fragment per ship per faction, one JSON
//! fragment per upgrade category. The engine builds read-only indexes once
//! and hydrates squad pilots into display-ready values.

pub mod cli;
pub mod data;
pub mod parallel;
pub mod server;
