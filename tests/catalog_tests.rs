//! Upgrade catalog: lazy loading, the success-only cache, the force-power
//! file rename, and the flattened name index with explicit collisions.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use holotable::data::catalog::{CategoryLoadCause, NameLookupError, UpgradeCatalog};
use holotable::data::upgrade::UpgradeCategory;

fn write_category(root: &Path, file_stem: &str, records: serde_json::Value) {
    let dir = root.join("upgrades");
    fs::create_dir_all(&dir).expect("upgrades dir");
    fs::write(dir.join(format!("{file_stem}.json")), records.to_string())
        .expect("category fragment");
}

fn fixture_tree() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path();
    write_category(
        root,
        "talent",
        json!([
            {"name": "Elusive", "xws": "elusive", "cost": 3, "slots": ["Talent"]},
            {"name": "Predator", "xws": "predator", "cost": 2, "slots": ["Talent"]}
        ]),
    );
    write_category(
        root,
        "cannon",
        json!([
            {"name": "Ion Cannon", "xws": "ioncannon", "cost": 5, "slots": ["Cannon"]}
        ]),
    );
    write_category(
        root,
        "force-power",
        json!([
            {"name": "Sense", "xws": "sense", "cost": 5, "slots": ["Force Power"]}
        ]),
    );
    tmp
}

#[test]
fn load_category_decodes_records() {
    let tmp = fixture_tree();
    let catalog = UpgradeCatalog::new(tmp.path());

    let talents = catalog
        .load_category(UpgradeCategory::Talent)
        .expect("talent fragment");
    assert_eq!(talents.len(), 2);
    assert_eq!(talents[0].xws, "elusive");
    assert_eq!(talents[0].name, "Elusive");
    assert_eq!(talents[0].cost, Some(3));
}

#[test]
fn forcepower_category_reads_renamed_fragment() {
    let tmp = fixture_tree();
    let catalog = UpgradeCatalog::new(tmp.path());

    assert!(catalog
        .category_path(UpgradeCategory::ForcePower)
        .ends_with("upgrades/force-power.json"));
    let powers = catalog
        .load_category(UpgradeCategory::ForcePower)
        .expect("force-power fragment");
    assert_eq!(powers[0].xws, "sense");
}

#[test]
fn second_load_hits_cache_and_never_rereads_disk() {
    let tmp = fixture_tree();
    let catalog = UpgradeCatalog::new(tmp.path());

    let first = catalog
        .load_category(UpgradeCategory::Cannon)
        .expect("first load");
    // Swap the fragment on disk; only a re-read could observe this.
    write_category(tmp.path(), "cannon", json!([]));

    let second = catalog
        .load_category(UpgradeCategory::Cannon)
        .expect("cached load");
    assert!(Arc::ptr_eq(&first, &second), "second call must return the cached list");
    assert_eq!(second[0].xws, "ioncannon");
}

#[test]
fn missing_fragment_is_a_load_error_not_an_empty_list() {
    let tmp = fixture_tree();
    let catalog = UpgradeCatalog::new(tmp.path());

    let err = catalog
        .load_category(UpgradeCategory::Illicit)
        .expect_err("missing fragment must not collapse to empty");
    assert_eq!(err.category, UpgradeCategory::Illicit);
    assert!(matches!(err.cause, CategoryLoadCause::Unreadable { .. }));

    // An actually empty category decodes to an empty list successfully.
    write_category(tmp.path(), "illicit", json!([]));
    let records = catalog
        .load_category(UpgradeCategory::Illicit)
        .expect("failures are not cached; the repaired fragment loads");
    assert!(records.is_empty());
}

#[test]
fn malformed_fragment_is_a_parse_error() {
    let tmp = fixture_tree();
    fs::write(tmp.path().join("upgrades/tech.json"), "{not json").expect("broken fragment");
    let catalog = UpgradeCatalog::new(tmp.path());

    let err = catalog
        .load_category(UpgradeCategory::Tech)
        .expect_err("malformed fragment");
    assert!(matches!(err.cause, CategoryLoadCause::Invalid { .. }));
}

#[test]
fn build_all_records_unavailable_categories_per_category() {
    let tmp = fixture_tree();
    let catalog = UpgradeCatalog::new(tmp.path()).build_all();

    assert_eq!(catalog.category(UpgradeCategory::Talent).map(<[_]>::len), Some(2));
    assert_eq!(catalog.card_count(), 4);
    // 3 fragments exist; the other 18 categories are unavailable, each
    // recorded individually instead of collapsing to empty lists.
    assert_eq!(catalog.unavailable().len(), 18);
    assert!(catalog.unavailable().contains_key(&UpgradeCategory::Astromech));
    assert!(catalog.category(UpgradeCategory::Astromech).is_none());
}

#[test]
fn name_lookup_is_exact_and_collisions_are_explicit() {
    let tmp = fixture_tree();
    // The same card name in two categories (title vs. crew is a real
    // pattern for named characters).
    write_category(
        tmp.path(),
        "crew",
        json!([{"name": "Chewbacca", "xws": "chewbacca", "cost": 4}]),
    );
    write_category(
        tmp.path(),
        "gunner",
        json!([{"name": "Chewbacca", "xws": "chewbacca-gunner", "cost": 3}]),
    );
    let catalog = UpgradeCatalog::new(tmp.path()).build_all();

    let (category, record) = catalog.find_by_name("Elusive").expect("unique name");
    assert_eq!(category, UpgradeCategory::Talent);
    assert_eq!(record.xws, "elusive");

    assert_eq!(
        catalog.find_by_name("Hull Upgrade"),
        Err(NameLookupError::NotFound {
            name: "Hull Upgrade".to_string()
        })
    );

    match catalog.find_by_name("Chewbacca") {
        Err(NameLookupError::Ambiguous { name, categories }) => {
            assert_eq!(name, "Chewbacca");
            assert_eq!(
                categories,
                vec![UpgradeCategory::Crew, UpgradeCategory::Gunner],
                "collision names every category carrying the name"
            );
        }
        other => panic!("expected explicit ambiguity, got {other:?}"),
    }
}
