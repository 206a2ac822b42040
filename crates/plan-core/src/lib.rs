#![deny(warnings)]

//! Core domain models and invariants for Restock.
//!
//! This crate defines the serializable types shared by the allocation
//! engine and its hosts: catalog materials and crafting groups, upgrade
//! plans, cost tables, and the shared inventory, with validation helpers
//! to guarantee basic invariants. The engine itself never rejects input;
//! the `validate_*` family is for hosts that want to clamp or flag bad
//! data before handing it over.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Unique identifier for a catalog material, e.g. "whopperflower_nectar".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub String);

/// Unique identifier for a crafting group (one ascending-rarity chain).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub String);

/// Unique identifier for a catalog entity (a character or an equipment piece).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

/// Unique identifier for an upgrade plan.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanId(pub String);

/// Identifier for a resource category, e.g. "enemy_drop", "gem", "boss".
///
/// Categories also key the experience pools ("character_exp" and friends).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub String);

/// Placeholder name emitted when a required category has no catalog binding.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Display name of the single currency pool.
pub const CREDITS_NAME: &str = "credits";

/// An immutable catalog material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Material identifier.
    pub id: MaterialId,
    /// Human-readable name; requirement and deficit entries carry this.
    pub name: String,
    /// Rarity tier (raw star/grade number, not the group position).
    pub rarity: u8,
    /// Category this material belongs to.
    pub category: CategoryId,
}

/// Materials of one category sharing a crafting chain.
///
/// Members are ordered strictly ascending by rarity; the tier index used by
/// the crafting allocator is the position in this vector, not the raw
/// rarity number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialGroup {
    /// Group identifier.
    pub id: GroupId,
    /// Category every member belongs to.
    pub category: CategoryId,
    /// Members, lowest craftable tier first.
    pub members: Vec<Material>,
}

/// One entity's material bindings: which groups and standalone materials
/// its progression rows draw from, per category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDetail {
    /// Crafting groups bound to this entity, per category. Most categories
    /// bind exactly one group; tiered cost rows resolve against the first.
    pub groups: BTreeMap<CategoryId, Vec<MaterialGroup>>,
    /// Standalone (non-craftable) materials bound to this entity.
    pub materials: BTreeMap<CategoryId, Material>,
}

/// The static catalog: per-entity details.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Bindings keyed by entity.
    pub details: BTreeMap<EntityId, CatalogDetail>,
}

/// The single shared inventory. Counts are never negative; a missing key
/// means zero. Owned by the hosting application; the engine only ever
/// mutates private clones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Per-material counts.
    pub materials: BTreeMap<MaterialId, u64>,
    /// Currency pool.
    pub credits: u64,
    /// Experience pools, one per experience category.
    pub experience: BTreeMap<CategoryId, u64>,
}

impl Inventory {
    /// Count on hand for a material; missing key means zero.
    pub fn count(&self, id: &MaterialId) -> u64 {
        self.materials.get(id).copied().unwrap_or(0)
    }

    /// Total experience points in a pool; missing key means zero.
    pub fn experience_in(&self, category: &CategoryId) -> u64 {
        self.experience.get(category).copied().unwrap_or(0)
    }

    /// Add to a material count (host-side restock and test setup).
    pub fn add_material(&mut self, id: &MaterialId, quantity: u64) {
        let entry = self.materials.entry(id.clone()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Remove up to `quantity` of a material, clamping at zero.
    /// Returns how much was actually taken.
    pub fn take_material(&mut self, id: &MaterialId, quantity: u64) -> u64 {
        let have = self.count(id);
        let take = quantity.min(have);
        if take > 0 {
            self.materials.insert(id.clone(), have - take);
        }
        take
    }

    /// Remove up to `quantity` credits, clamping at zero. Returns the taken amount.
    pub fn take_credits(&mut self, quantity: u64) -> u64 {
        let take = quantity.min(self.credits);
        self.credits -= take;
        take
    }

    /// Remove up to `quantity` points from an experience pool, clamping at
    /// zero. Returns the taken amount.
    pub fn take_experience(&mut self, category: &CategoryId, quantity: u64) -> u64 {
        let have = self.experience_in(category);
        let take = quantity.min(have);
        if take > 0 {
            self.experience.insert(category.clone(), have - take);
        }
        take
    }
}

/// Which list a plan lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanKind {
    /// Character power-up plan.
    Character,
    /// Equipment power-up plan.
    Equipment,
}

/// A tagged reference to one plan; the priority order is a sequence of these.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanRef {
    /// Plan list the id belongs to.
    pub kind: PlanKind,
    /// Plan identifier within that list.
    pub id: PlanId,
}

impl PlanRef {
    /// Convenience constructor for a character plan reference.
    pub fn character(id: impl Into<String>) -> Self {
        Self {
            kind: PlanKind::Character,
            id: PlanId(id.into()),
        }
    }

    /// Convenience constructor for an equipment plan reference.
    pub fn equipment(id: impl Into<String>) -> Self {
        Self {
            kind: PlanKind::Equipment,
            id: PlanId(id.into()),
        }
    }
}

/// A character's progression coordinate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProgress {
    /// Ascension bracket reached (0 = unascended).
    pub ascension: u8,
    /// Character level.
    pub level: u8,
    /// Level per skill slot; an absent slot counts as level 1.
    pub skills: BTreeMap<String, u8>,
    /// Optional inherent/stat nodes unlocked (each an independent switch).
    pub nodes: BTreeSet<String>,
}

/// A character upgrade plan: move `current` to `target`.
///
/// Target is expected to be at or above current component-wise; the
/// engine does not enforce this and degrades to empty requirements when
/// it is violated. Hosts can call [`validate_character_plan`] to catch
/// it early.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPlan {
    /// Plan identifier.
    pub id: PlanId,
    /// Catalog entity this plan upgrades.
    pub entity: EntityId,
    /// Progress already reached.
    pub current: CharacterProgress,
    /// Progress to reach.
    pub target: CharacterProgress,
}

/// An equipment piece's progression coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentProgress {
    /// Ascension bracket reached.
    pub ascension: u8,
    /// Equipment level.
    pub level: u8,
}

/// An equipment upgrade plan: move `current` to `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentPlan {
    /// Plan identifier.
    pub id: PlanId,
    /// Catalog entity this plan upgrades.
    pub entity: EntityId,
    /// Progress already reached.
    pub current: EquipmentProgress,
    /// Progress to reach.
    pub target: EquipmentProgress,
}

/// How one cost row amount references materials.
///
/// Progression data mixes two shapes: positional per-tier quantities
/// aligned to a group's ascending members, and direct name lookups. The
/// calculator resolves both into plain [`RequirementEntry`] values so the
/// allocation side never sees this distinction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowAmount {
    /// `quantities[i]` units of the bound group's member at tier `i`.
    Tiered {
        /// Per-tier quantities, lowest tier first.
        quantities: Vec<u64>,
    },
    /// A fixed quantity of one named material.
    Named {
        /// Material name as it appears in the catalog.
        name: String,
        /// Units required.
        quantity: u64,
    },
}

/// One category's share of a cost row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCost {
    /// Category the amount draws from.
    pub category: CategoryId,
    /// The amount, tiered or named.
    pub amount: RowAmount,
}

/// The full material/currency cost of crossing one progression step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRow {
    /// Material costs by category.
    pub items: Vec<RowCost>,
    /// Currency cost.
    pub credits: u64,
}

/// Static progression costs for character plans.
///
/// Maps are keyed by the bracket/level *reached*; lookups outside the
/// table's domain simply find nothing, which is what makes inverted or
/// out-of-range plan coordinates degrade to zero requirements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCostTable {
    /// Cost to cross into each ascension bracket.
    pub ascensions: BTreeMap<u8, CostRow>,
    /// Cost to reach each skill level (shared by every skill slot).
    pub skill_levels: BTreeMap<u8, CostRow>,
    /// One-time cost per optional node id.
    pub nodes: BTreeMap<String, CostRow>,
    /// Raw experience points to reach each character level.
    pub level_exp: BTreeMap<u8, u64>,
    /// Experience pool the level costs draw from.
    pub exp_category: CategoryId,
}

/// Static progression costs for equipment plans.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCostTable {
    /// Cost to cross into each ascension bracket.
    pub ascensions: BTreeMap<u8, CostRow>,
    /// Raw experience points to reach each equipment level.
    pub level_exp: BTreeMap<u8, u64>,
    /// Experience pool the level costs draw from.
    pub exp_category: CategoryId,
}

/// The versioned progression table pair supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTables {
    /// Data version of the table set.
    pub version: u32,
    /// Character progression costs.
    pub character: CharacterCostTable,
    /// Equipment progression costs.
    pub equipment: EquipmentCostTable,
}

/// What kind of resource a requirement or deficit entry names.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// A catalog material in the given category.
    Material(CategoryId),
    /// Raw experience points from the given pool.
    Experience(CategoryId),
    /// Credits.
    Currency,
}

/// One itemized requirement produced for a plan. Entries for the same
/// `(kind, name)` within one plan are merged by summing quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementEntry {
    /// Resource kind.
    pub kind: EntryKind,
    /// Display name (material name, pool name, or [`CREDITS_NAME`]).
    pub name: String,
    /// Units required; never negative.
    pub quantity: u64,
    /// Rarity of the named material, when known.
    pub rarity: Option<u8>,
}

/// Unmet need after a full allocation pass. Same shape as a requirement
/// entry; only the provenance differs.
pub type DeficitEntry = RequirementEntry;

/// A plan's full requirement set: the credits total plus itemized entries
/// (which include a mirrored currency entry, so consumers can treat
/// credits uniformly as just another resource).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    /// Total credits cost.
    pub credits: u64,
    /// Itemized entries in presentation order.
    pub entries: Vec<RequirementEntry>,
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// An id or display name is empty.
    #[error("empty identifier or name")]
    EmptyName,
    /// A group has no members.
    #[error("group {0} has no members")]
    EmptyGroup(String),
    /// Group members are not strictly ascending by rarity.
    #[error("group {0} members are not strictly ascending by rarity")]
    UnsortedGroup(String),
    /// The same material id appears twice in one group.
    #[error("duplicate material id in group: {0}")]
    DuplicateMaterial(String),
    /// A material or group is filed under a category it does not claim.
    #[error("category mismatch under {0}")]
    CategoryMismatch(String),
    /// A plan's target progress is below its current progress.
    #[error("plan {0} target is below its current progress")]
    TargetBelowCurrent(String),
}

/// Validate a single material.
pub fn validate_material(m: &Material) -> Result<(), ValidationError> {
    if m.id.0.trim().is_empty() || m.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Validate a crafting group: nonempty, strictly ascending rarity, unique
/// member ids, every member filed under the group's category.
pub fn validate_group(g: &MaterialGroup) -> Result<(), ValidationError> {
    if g.id.0.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if g.members.is_empty() {
        return Err(ValidationError::EmptyGroup(g.id.0.clone()));
    }
    let mut seen: BTreeSet<&MaterialId> = BTreeSet::new();
    for m in &g.members {
        validate_material(m)?;
        if m.category != g.category {
            return Err(ValidationError::CategoryMismatch(g.id.0.clone()));
        }
        if !seen.insert(&m.id) {
            return Err(ValidationError::DuplicateMaterial(m.id.0.clone()));
        }
    }
    for pair in g.members.windows(2) {
        if pair[1].rarity <= pair[0].rarity {
            return Err(ValidationError::UnsortedGroup(g.id.0.clone()));
        }
    }
    Ok(())
}

/// Validate one entity's bindings, including map-key consistency.
pub fn validate_detail(d: &CatalogDetail) -> Result<(), ValidationError> {
    for (category, groups) in &d.groups {
        for g in groups {
            validate_group(g)?;
            if g.category != *category {
                return Err(ValidationError::CategoryMismatch(category.0.clone()));
            }
        }
    }
    for (category, m) in &d.materials {
        validate_material(m)?;
        if m.category != *category {
            return Err(ValidationError::CategoryMismatch(category.0.clone()));
        }
    }
    Ok(())
}

/// Validate the whole catalog.
pub fn validate_catalog(c: &Catalog) -> Result<(), ValidationError> {
    for (entity, detail) in &c.details {
        if entity.0.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        validate_detail(detail)?;
    }
    Ok(())
}

/// Check that a character plan's target is at or above its current
/// progress component-wise. Host-side helper; the engine never calls this.
pub fn validate_character_plan(p: &CharacterPlan) -> Result<(), ValidationError> {
    let below = |msg: &PlanId| ValidationError::TargetBelowCurrent(msg.0.clone());
    if p.target.ascension < p.current.ascension || p.target.level < p.current.level {
        return Err(below(&p.id));
    }
    for (slot, cur) in &p.current.skills {
        if let Some(tgt) = p.target.skills.get(slot) {
            if tgt < cur {
                return Err(below(&p.id));
            }
        }
    }
    if !p.target.nodes.is_superset(&p.current.nodes) {
        return Err(below(&p.id));
    }
    Ok(())
}

/// Check that an equipment plan's target is at or above its current progress.
pub fn validate_equipment_plan(p: &EquipmentPlan) -> Result<(), ValidationError> {
    if p.target.ascension < p.current.ascension || p.target.level < p.current.level {
        return Err(ValidationError::TargetBelowCurrent(p.id.0.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn material(id: &str, rarity: u8, category: &str) -> Material {
        Material {
            id: MaterialId(id.to_string()),
            name: id.replace('_', " "),
            rarity,
            category: CategoryId(category.to_string()),
        }
    }

    fn drop_group() -> MaterialGroup {
        MaterialGroup {
            id: GroupId("slime".to_string()),
            category: CategoryId("enemy_drop".to_string()),
            members: vec![
                material("slime_condensate", 1, "enemy_drop"),
                material("slime_secretions", 2, "enemy_drop"),
                material("slime_concentrate", 3, "enemy_drop"),
            ],
        }
    }

    #[test]
    fn serde_roundtrip_group() {
        let g = drop_group();
        let s = serde_json::to_string(&g).unwrap();
        let back: MaterialGroup = serde_json::from_str(&s).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.members[0].rarity, 1);
    }

    #[test]
    fn catalog_roundtrip_and_validation() {
        let mut detail = CatalogDetail::default();
        detail.groups.insert(
            CategoryId("enemy_drop".to_string()),
            vec![drop_group()],
        );
        detail.materials.insert(
            CategoryId("boss".to_string()),
            material("hurricane_seed", 4, "boss"),
        );
        let mut catalog = Catalog::default();
        catalog
            .details
            .insert(EntityId("amber".to_string()), detail);

        validate_catalog(&catalog).unwrap();
        let s = serde_json::to_string_pretty(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&s).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn group_validation_rejects_unsorted_members() {
        let mut g = drop_group();
        g.members.swap(0, 2);
        assert_eq!(
            validate_group(&g),
            Err(ValidationError::UnsortedGroup("slime".to_string()))
        );
    }

    #[test]
    fn group_validation_rejects_duplicates_and_mixed_categories() {
        let mut g = drop_group();
        g.members[1] = material("slime_condensate", 2, "enemy_drop");
        assert_eq!(
            validate_group(&g),
            Err(ValidationError::DuplicateMaterial(
                "slime_condensate".to_string()
            ))
        );

        let mut g = drop_group();
        g.members[1].category = CategoryId("gem".to_string());
        assert_eq!(
            validate_group(&g),
            Err(ValidationError::CategoryMismatch("slime".to_string()))
        );
    }

    #[test]
    fn empty_group_rejected() {
        let g = MaterialGroup {
            id: GroupId("empty".to_string()),
            category: CategoryId("enemy_drop".to_string()),
            members: vec![],
        };
        assert_eq!(
            validate_group(&g),
            Err(ValidationError::EmptyGroup("empty".to_string()))
        );
    }

    #[test]
    fn inventory_missing_key_is_zero() {
        let inv = Inventory::default();
        assert_eq!(inv.count(&MaterialId("nope".to_string())), 0);
        assert_eq!(inv.experience_in(&CategoryId("character_exp".to_string())), 0);
    }

    #[test]
    fn inventory_takes_clamp_at_zero() {
        let id = MaterialId("slime_condensate".to_string());
        let pool = CategoryId("character_exp".to_string());
        let mut inv = Inventory::default();
        inv.add_material(&id, 5);
        inv.credits = 100;
        inv.experience.insert(pool.clone(), 1000);

        assert_eq!(inv.take_material(&id, 8), 5);
        assert_eq!(inv.count(&id), 0);
        assert_eq!(inv.take_credits(250), 100);
        assert_eq!(inv.credits, 0);
        assert_eq!(inv.take_experience(&pool, 400), 400);
        assert_eq!(inv.experience_in(&pool), 600);
    }

    #[test]
    fn character_plan_validation() {
        let mut plan = CharacterPlan {
            id: PlanId("p1".to_string()),
            entity: EntityId("amber".to_string()),
            current: CharacterProgress {
                ascension: 2,
                level: 40,
                skills: BTreeMap::from([("attack".to_string(), 4)]),
                nodes: BTreeSet::from(["stat_1".to_string()]),
            },
            target: CharacterProgress {
                ascension: 4,
                level: 70,
                skills: BTreeMap::from([("attack".to_string(), 8)]),
                nodes: BTreeSet::from(["stat_1".to_string(), "stat_2".to_string()]),
            },
        };
        validate_character_plan(&plan).unwrap();

        plan.target.level = 30;
        assert_eq!(
            validate_character_plan(&plan),
            Err(ValidationError::TargetBelowCurrent("p1".to_string()))
        );

        plan.target.level = 70;
        plan.target.nodes.clear();
        assert!(validate_character_plan(&plan).is_err());
    }

    #[test]
    fn equipment_plan_validation() {
        let plan = EquipmentPlan {
            id: PlanId("w1".to_string()),
            entity: EntityId("rust_bow".to_string()),
            current: EquipmentProgress { ascension: 1, level: 30 },
            target: EquipmentProgress { ascension: 0, level: 30 },
        };
        assert_eq!(
            validate_equipment_plan(&plan),
            Err(ValidationError::TargetBelowCurrent("w1".to_string()))
        );
    }

    #[test]
    fn tables_and_inventory_roundtrip() {
        let tables = CostTables {
            version: 3,
            character: CharacterCostTable {
                ascensions: BTreeMap::from([(
                    1,
                    CostRow {
                        items: vec![RowCost {
                            category: CategoryId("enemy_drop".to_string()),
                            amount: RowAmount::Tiered {
                                quantities: vec![3, 0, 0],
                            },
                        }],
                        credits: 20_000,
                    },
                )]),
                skill_levels: BTreeMap::new(),
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
                level_exp: BTreeMap::from([(2, 1_000)]),
                exp_category: CategoryId("character_exp".to_string()),
            },
            equipment: EquipmentCostTable {
                ascensions: BTreeMap::new(),
                level_exp: BTreeMap::from([(2, 400)]),
                exp_category: CategoryId("equipment_exp".to_string()),
            },
        };
        let s = serde_json::to_string(&tables).unwrap();
        let back: CostTables = serde_json::from_str(&s).unwrap();
        assert_eq!(back, tables);

        let mut inv = Inventory::default();
        inv.add_material(&MaterialId("slime_condensate".to_string()), 14);
        inv.credits = 30_000;
        inv.experience
            .insert(CategoryId("character_exp".to_string()), 2_000);
        let s = serde_json::to_string(&inv).unwrap();
        let back: Inventory = serde_json::from_str(&s).unwrap();
        assert_eq!(back, inv);
    }

    #[test]
    fn plan_roundtrip() {
        let plan = CharacterPlan {
            id: PlanId("p1".to_string()),
            entity: EntityId("amber".to_string()),
            current: CharacterProgress::default(),
            target: CharacterProgress {
                ascension: 6,
                level: 90,
                skills: BTreeMap::from([
                    ("attack".to_string(), 10),
                    ("skill".to_string(), 10),
                ]),
                nodes: BTreeSet::from(["inherent_1".to_string()]),
            },
        };
        let s = serde_json::to_string(&plan).unwrap();
        let back: CharacterPlan = serde_json::from_str(&s).unwrap();
        assert_eq!(back, plan);
    }

    proptest! {
        #[test]
        fn take_material_never_exceeds_stock(stock in 0u64..10_000, want in 0u64..20_000) {
            let id = MaterialId("m".to_string());
            let mut inv = Inventory::default();
            inv.add_material(&id, stock);
            let taken = inv.take_material(&id, want);
            prop_assert!(taken <= stock);
            prop_assert!(taken <= want);
            prop_assert_eq!(inv.count(&id), stock - taken);
        }

        #[test]
        fn ascending_groups_validate(base in 1u8..50, len in 1usize..6) {
            let category = CategoryId("enemy_drop".to_string());
            let members: Vec<Material> = (0..len)
                .map(|i| Material {
                    id: MaterialId(format!("m{i}")),
                    name: format!("m{i}"),
                    rarity: base + i as u8,
                    category: category.clone(),
                })
                .collect();
            let g = MaterialGroup {
                id: GroupId("g".to_string()),
                category,
                members,
            };
            prop_assert!(validate_group(&g).is_ok());
        }
    }
}
