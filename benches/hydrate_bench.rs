//! Hydration throughput benchmarks: pilots per second against a synthetic
//! card tree, warm-cache vs. squad-level hydration.
//!
//! Run with: `cargo bench`

use std::fs;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;
use tempfile::TempDir;

use holotable::data::catalog::UpgradeCatalog;
use holotable::data::hydrate::Hydrator;
use holotable::data::ship_index::ShipFileIndex;
use holotable::data::squad::{parse_squad, PersistedSquad};
use holotable::parallel::WorkerPool;

fn write_json(root: &Path, rel: &str, value: serde_json::Value) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("dirs");
    fs::write(path, value.to_string()).expect("fixture file");
}

fn fixture_tree() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path();
    write_json(
        root,
        "galacticempire/tie-ln-fighter.json",
        json!({
            "name": "TIE/ln Fighter",
            "xws": "tielnfighter",
            "pilots": [
                {"name": "Iden Versio", "xws": "idenversio", "cost": 40,
                 "slots": ["Talent", "Cannon", "Modification"]},
                {"name": "Academy Pilot", "xws": "academypilot", "cost": 22}
            ]
        }),
    );
    let talents: Vec<serde_json::Value> = (0..60)
        .map(|i| json!({"name": format!("Talent {i}"), "xws": format!("talent{i}"), "cost": 2}))
        .collect();
    write_json(root, "upgrades/talent.json", json!(talents));
    write_json(
        root,
        "upgrades/cannon.json",
        json!([{"name": "Ion Cannon", "xws": "ioncannon", "cost": 5}]),
    );
    tmp
}

fn bench_squad(pilot_count: usize) -> PersistedSquad {
    let pilots: Vec<serde_json::Value> = (0..pilot_count)
        .map(|i| {
            json!({
                "xws": "idenversio",
                "ship": "tielnfighter",
                "points": 43,
                "upgrades": {"talent": [format!("talent{}", i % 60)], "cannon": ["ioncannon"]}
            })
        })
        .collect();
    parse_squad(
        &json!({"faction": "Galactic Empire", "pilots": pilots}).to_string(),
    )
    .expect("bench squad")
}

fn bench_hydration(c: &mut Criterion) {
    let tmp = fixture_tree();
    let ships = ShipFileIndex::build(tmp.path()).expect("index");
    let upgrades = UpgradeCatalog::new(tmp.path());
    let hydrator = Hydrator::new(&ships, &upgrades);

    // Warm the category cache so the loop measures resolution, not IO.
    let warm_squad = bench_squad(1);
    let _ = hydrator.hydrate_squad(&warm_squad);

    let mut group = c.benchmark_group("hydration");
    group.sample_size(60);

    let squad = bench_squad(8);
    group.throughput(Throughput::Elements(8));
    group.bench_function("squad_8_pilots_sequential", |b| {
        b.iter(|| {
            let outcome = hydrator.hydrate_squad(black_box(&squad));
            assert_eq!(outcome.error_count(), 0);
            outcome
        })
    });

    let pool = WorkerPool::default();
    group.bench_function("squad_8_pilots_parallel", |b| {
        b.iter(|| hydrator.hydrate_squad_parallel(black_box(&squad), &pool))
    });

    let single = bench_squad(1);
    group.throughput(Throughput::Elements(1));
    group.bench_function("single_pilot", |b| {
        b.iter(|| hydrator.hydrate_squad(black_box(&single)))
    });

    group.finish();
}

criterion_group!(benches, bench_hydration);
criterion_main!(benches);
