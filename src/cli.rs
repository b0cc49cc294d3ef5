//! Command dispatch for the `holotable` binary.
//!
//! Commands: `serve`, `hydrate <squad.json> [--table]`, `catalog [category]`,
//! `validate [root]`. Card-data root comes from `HOLOTABLE_DATA` (default
//! `data`), bind address from `HOLOTABLE_BIND`.

use std::env;
use std::fs;

use crate::data::catalog::UpgradeCatalog;
use crate::data::data_root;
use crate::data::hydrate::Hydrator;
use crate::data::ship_index::ShipFileIndex;
use crate::data::squad::parse_squad;
use crate::data::upgrade::{UpgradeCategory, ALL_CATEGORIES};
use crate::data::validate::validate_card_data;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Hydrate,
    Catalog,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("hydrate") => Some(Command::Hydrate),
        Some("catalog") => Some(Command::Catalog),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Hydrate) => handle_hydrate(args),
        Some(Command::Catalog) => handle_catalog(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: holotable <serve|hydrate|catalog|validate>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("HOLOTABLE_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr, &data_root()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_hydrate(args: &[String]) -> i32 {
    let Some(path) = args.get(2).filter(|arg| !arg.starts_with("--")) else {
        eprintln!("usage: holotable hydrate <squad.json> [--table]");
        return 2;
    };
    let as_table = args.iter().any(|arg| arg == "--table");

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("unable to read squad '{path}': {err}");
            return 1;
        }
    };
    let squad = match parse_squad(&raw) {
        Ok(squad) => squad,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let root = data_root();
    let ships = match ShipFileIndex::build(&root) {
        Ok(ships) => ships,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    let upgrades = UpgradeCatalog::new(&root);
    let outcome = Hydrator::new(&ships, &upgrades).hydrate_squad(&squad);

    if as_table {
        println!("pilot\tship\tpoints\tupgrades\tstatus");
        for (persisted, result) in squad.pilots.iter().zip(&outcome.pilots) {
            match result {
                Ok(pilot) => println!(
                    "{}\t{}\t{}\t{}\tok",
                    persisted.xws,
                    pilot.ship.name,
                    pilot.points,
                    pilot.upgrades.len()
                ),
                Err(err) => println!(
                    "{}\t{}\t{}\t-\terror: {err}",
                    persisted.xws, persisted.ship, persisted.points
                ),
            }
        }
    } else {
        let payload: Vec<serde_json::Value> = outcome
            .pilots
            .iter()
            .map(|result| match result {
                Ok(pilot) => serde_json::json!({"status": "ok", "pilot": pilot}),
                Err(err) => serde_json::json!({"status": "error", "error": err.to_string()}),
            })
            .collect();
        match serde_json::to_string_pretty(&payload) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize hydration result: {err}");
                return 1;
            }
        }
    }

    let errors = outcome.error_count();
    if errors > 0 {
        eprintln!("{errors} pilot(s) failed to hydrate");
        1
    } else {
        0
    }
}

fn handle_catalog(args: &[String]) -> i32 {
    let catalog = UpgradeCatalog::new(data_root());

    match args.get(2).map(String::as_str) {
        None => {
            println!("category\tcards\tstatus");
            for category in ALL_CATEGORIES {
                match catalog.load_category(category) {
                    Ok(records) => println!("{}\t{}\tok", category.tag(), records.len()),
                    Err(err) => println!("{}\t-\t{err}", category.tag()),
                }
            }
            0
        }
        Some(tag) => {
            let category = match UpgradeCategory::parse(tag) {
                Ok(category) => category,
                Err(err) => {
                    eprintln!("{err}");
                    return 2;
                }
            };
            match catalog.load_category(category) {
                Ok(records) => match serde_json::to_string_pretty(records.as_ref()) {
                    Ok(payload) => {
                        println!("{payload}");
                        0
                    }
                    Err(err) => {
                        eprintln!("failed to serialize category: {err}");
                        1
                    }
                },
                Err(err) => {
                    eprintln!("{err}");
                    1
                }
            }
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let root = match args.get(2) {
        Some(path) => std::path::PathBuf::from(path),
        None => data_root(),
    };

    match validate_card_data(&root) {
        Ok(report) => {
            for diagnostic in &report.diagnostics {
                eprintln!("- {diagnostic}");
            }
            if report.has_errors() {
                eprintln!(
                    "validation failed: {} diagnostic(s)",
                    report.diagnostics.len()
                );
                1
            } else {
                println!("validation passed: {}", root.display());
                0
            }
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}
