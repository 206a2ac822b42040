#![deny(warnings)]

//! Headless scenario runner: loads a planning scenario (or a built-in
//! demo), prints each plan's breakdown with its availability at its
//! order position, and the combined remaining list.

use anyhow::{Context, Result};
use plan_core::*;
use plan_engine::{Ledger, PriorityOrder};
use plan_store::InventoryStore;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
struct Scenario {
    catalog: Catalog,
    tables: CostTables,
    #[serde(default)]
    characters: Vec<CharacterPlan>,
    #[serde(default)]
    equipment: Vec<EquipmentPlan>,
    #[serde(default)]
    order: Option<PriorityOrder>,
    #[serde(default)]
    inventory: Inventory,
}

fn parse_args() -> Option<String> {
    let mut scenario: Option<String> = None;
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => scenario = it.next(),
            _ => {}
        }
    }
    scenario
}

fn load_scenario(path: &str) -> Result<Scenario> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading scenario {path}"))?;
    let scenario: Scenario =
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {path}"))?;
    Ok(scenario)
}

fn material(id: &str, name: &str, rarity: u8, category: &str) -> Material {
    Material {
        id: MaterialId(id.to_string()),
        name: name.to_string(),
        rarity,
        category: CategoryId(category.to_string()),
    }
}

fn slime_group() -> MaterialGroup {
    MaterialGroup {
        id: GroupId("slime".to_string()),
        category: CategoryId("enemy_drop".to_string()),
        members: vec![
            material("slime_condensate", "Slime Condensate", 1, "enemy_drop"),
            material("slime_secretions", "Slime Secretions", 2, "enemy_drop"),
            material("slime_concentrate", "Slime Concentrate", 3, "enemy_drop"),
        ],
    }
}

fn tiered(category: &str, quantities: &[u64]) -> RowCost {
    RowCost {
        category: CategoryId(category.to_string()),
        amount: RowAmount::Tiered {
            quantities: quantities.to_vec(),
        },
    }
}

fn demo_scenario() -> Scenario {
    let mut amber = CatalogDetail::default();
    amber
        .groups
        .insert(CategoryId("enemy_drop".to_string()), vec![slime_group()]);
    amber.groups.insert(
        CategoryId("gem".to_string()),
        vec![MaterialGroup {
            id: GroupId("agate".to_string()),
            category: CategoryId("gem".to_string()),
            members: vec![
                material("agate_sliver", "Agate Sliver", 2, "gem"),
                material("agate_fragment", "Agate Fragment", 3, "gem"),
            ],
        }],
    );
    amber.materials.insert(
        CategoryId("boss".to_string()),
        material("hurricane_seed", "Hurricane Seed", 4, "boss"),
    );

    let mut bow = CatalogDetail::default();
    bow.groups
        .insert(CategoryId("enemy_drop".to_string()), vec![slime_group()]);

    let mut catalog = Catalog::default();
    catalog.details.insert(EntityId("amber".to_string()), amber);
    catalog.details.insert(EntityId("rust_bow".to_string()), bow);

    let tables = CostTables {
        version: 1,
        character: CharacterCostTable {
            ascensions: BTreeMap::from([
                (
                    1,
                    CostRow {
                        items: vec![tiered("enemy_drop", &[3, 0, 0]), tiered("gem", &[1, 0])],
                        credits: 20_000,
                    },
                ),
                (
                    2,
                    CostRow {
                        items: vec![tiered("enemy_drop", &[0, 3, 0]), tiered("boss", &[2])],
                        credits: 40_000,
                    },
                ),
            ]),
            skill_levels: BTreeMap::from([(
                2,
                CostRow {
                    items: vec![tiered("enemy_drop", &[6, 0, 0])],
                    credits: 12_500,
                },
            )]),
            nodes: BTreeMap::from([(
                "stat_1".to_string(),
                CostRow {
                    items: vec![RowCost {
                        category: CategoryId("boss".to_string()),
                        amount: RowAmount::Named {
                            name: "Hurricane Seed".to_string(),
                            quantity: 1,
                        },
                    }],
                    credits: 5_000,
                },
            )]),
            level_exp: BTreeMap::from([(2, 1_000), (3, 1_200), (4, 1_500)]),
            exp_category: CategoryId("character_exp".to_string()),
        },
        equipment: EquipmentCostTable {
            ascensions: BTreeMap::from([(
                1,
                CostRow {
                    items: vec![tiered("enemy_drop", &[2, 0, 0])],
                    credits: 5_000,
                },
            )]),
            level_exp: BTreeMap::from([(2, 400), (3, 600)]),
            exp_category: CategoryId("equipment_exp".to_string()),
        },
    };

    let characters = vec![CharacterPlan {
        id: PlanId("amber_up".to_string()),
        entity: EntityId("amber".to_string()),
        current: CharacterProgress::default(),
        target: CharacterProgress {
            ascension: 2,
            level: 4,
            skills: BTreeMap::from([("attack".to_string(), 2)]),
            nodes: BTreeSet::from(["stat_1".to_string()]),
        },
    }];
    let equipment = vec![EquipmentPlan {
        id: PlanId("bow_up".to_string()),
        entity: EntityId("rust_bow".to_string()),
        current: EquipmentProgress::default(),
        target: EquipmentProgress {
            ascension: 1,
            level: 3,
        },
    }];

    let mut inventory = Inventory::default();
    inventory.add_material(&MaterialId("slime_condensate".to_string()), 14);
    inventory.add_material(&MaterialId("slime_secretions".to_string()), 1);
    inventory.add_material(&MaterialId("agate_sliver".to_string()), 1);
    inventory.add_material(&MaterialId("hurricane_seed".to_string()), 1);
    inventory.credits = 30_000;
    inventory
        .experience
        .insert(CategoryId("character_exp".to_string()), 2_000);

    Scenario {
        catalog,
        tables,
        characters,
        equipment,
        order: None,
        inventory,
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let scenario_path = parse_args();
    info!(?scenario_path, git_sha = env!("GIT_SHA"), "starting scenario runner");

    let scenario = match &scenario_path {
        Some(path) => load_scenario(path)?,
        None => demo_scenario(),
    };
    if let Err(err) = validate_catalog(&scenario.catalog) {
        warn!(%err, "catalog failed validation; results may carry placeholders");
    }

    let Scenario {
        catalog,
        tables,
        characters,
        equipment,
        order,
        inventory,
    } = scenario;
    let mut order = order.unwrap_or_else(|| PriorityOrder::from_plans(&characters, &equipment));
    order.reconcile(&characters, &equipment);

    // The host owns the inventory; the engine only ever sees snapshots.
    let store = InventoryStore::new(inventory);
    let snapshot = store.get();
    let ledger = Ledger::new(&catalog, &tables, &characters, &equipment, &order, &snapshot);

    println!(
        "Scenario OK | characters: {} | equipment: {} | ordered: {} | tables: v{}",
        characters.len(),
        equipment.len(),
        order.len(),
        tables.version
    );

    for (position, r) in order.refs().iter().enumerate() {
        let reqs = match ledger.plan_breakdown(r) {
            Some(reqs) => reqs,
            None => {
                println!("Plan {} | missing from the plan lists", r.id.0);
                continue;
            }
        };
        println!(
            "Plan {} | kind: {:?} | entries: {} | credits: {}",
            r.id.0,
            r.kind,
            reqs.entries.len(),
            reqs.credits
        );
        let availability = ledger.availability_at(position);
        for entry in &reqs.entries {
            let available = match &entry.kind {
                EntryKind::Material(category) => availability.available_for(category, &entry.name),
                EntryKind::Experience(pool) => availability.available_exp(pool),
                EntryKind::Currency => availability.available_credits(),
            };
            println!(
                "  need {:>7} | available {:>7} | {}",
                entry.quantity, available, entry.name
            );
        }
    }

    let remaining = ledger.combined_remaining();
    println!("Remaining | entries: {}", remaining.len());
    for entry in &remaining {
        println!("  short {:>7} | {}", entry.quantity, entry.name);
    }

    Ok(())
}
