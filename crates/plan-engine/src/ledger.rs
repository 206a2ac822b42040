//! Sequential inventory allocation across the priority order.
//!
//! A [`Ledger`] borrows the catalog, cost tables, plan lists, priority
//! order, and shared inventory, and answers every query by a fresh
//! deterministic replay: walk the ordered plans, compute each plan's
//! requirements, and deplete a private snapshot of the inventory.
//! Grouped materials go through the crafting allocator; standalone
//! materials, credits, and experience pools are flat clamped decrements.
//! The caller's inventory is never mutated.

use crate::crafting::{allocate, coverage};
use crate::ordering::PriorityOrder;
use crate::requirements::{character_requirements, equipment_requirements};
use crate::resolve::Taxonomy;
use plan_core::{
    Catalog, CategoryId, CharacterPlan, CostTables, DeficitEntry, EntryKind, EquipmentPlan,
    Inventory, PlanId, PlanKind, PlanRef, RequirementEntry, Requirements,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Deficit presentation order: experience, then currency, then grouped
/// materials by group rank and ascending rarity, then everything else by
/// category and name.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct DeficitKey {
    class: u8,
    group_rank: usize,
    rarity: u8,
    category: CategoryId,
    name: String,
}

/// One allocation pass over the shared inventory.
pub struct Ledger<'a> {
    catalog: &'a Catalog,
    tables: &'a CostTables,
    order: &'a PriorityOrder,
    inventory: &'a Inventory,
    characters: BTreeMap<&'a PlanId, &'a CharacterPlan>,
    equipment: BTreeMap<&'a PlanId, &'a EquipmentPlan>,
    taxonomy: Taxonomy<'a>,
}

impl<'a> Ledger<'a> {
    /// Borrow the inputs and index the catalog once.
    pub fn new(
        catalog: &'a Catalog,
        tables: &'a CostTables,
        characters: &'a [CharacterPlan],
        equipment: &'a [EquipmentPlan],
        order: &'a PriorityOrder,
        inventory: &'a Inventory,
    ) -> Self {
        Self {
            catalog,
            tables,
            order,
            inventory,
            characters: characters.iter().map(|p| (&p.id, p)).collect(),
            equipment: equipment.iter().map(|p| (&p.id, p)).collect(),
            taxonomy: Taxonomy::from_catalog(catalog),
        }
    }

    /// One plan's requirements, ignoring the inventory. `None` only when
    /// the ref points at no known plan; a plan whose entity is missing
    /// from the catalog still gets a (placeholder-heavy) breakdown.
    pub fn plan_breakdown(&self, r: &PlanRef) -> Option<Requirements> {
        match r.kind {
            PlanKind::Character => self.characters.get(&r.id).map(|plan| {
                character_requirements(
                    plan,
                    self.catalog.details.get(&plan.entity),
                    &self.tables.character,
                )
            }),
            PlanKind::Equipment => self.equipment.get(&r.id).map(|plan| {
                equipment_requirements(
                    plan,
                    self.catalog.details.get(&plan.entity),
                    &self.tables.equipment,
                )
            }),
        }
    }

    /// What the inventory still offers to the plan at `position`, after
    /// every higher-priority plan has taken its share.
    pub fn availability_at(&self, position: usize) -> Availability<'_> {
        Availability {
            taxonomy: &self.taxonomy,
            snapshot: self.replay(position, None),
        }
    }

    /// Remaining quantity offered to the plan at `position` for one
    /// requirement name (crafting coverage for grouped materials).
    pub fn available_for_plan(&self, position: usize, category: &CategoryId, name: &str) -> u64 {
        self.availability_at(position).available_for(category, name)
    }

    /// Remaining experience offered to the plan at `position` from `pool`.
    pub fn total_exp_for_plan(&self, position: usize, pool: &CategoryId) -> u64 {
        self.availability_at(position).available_exp(pool)
    }

    /// Unmet need across the whole order, merged per resource and stably
    /// sorted: experience, currency, grouped materials (group rank, then
    /// rarity), then remaining materials by category and name.
    pub fn combined_remaining(&self) -> Vec<DeficitEntry> {
        let mut deficits: BTreeMap<DeficitKey, DeficitEntry> = BTreeMap::new();
        self.replay(self.order.len(), Some(&mut deficits));
        deficits.into_values().collect()
    }

    /// Deplete a private snapshot across order entries `[0, limit)`,
    /// recording unmet need into `deficits` when given.
    fn replay(
        &self,
        limit: usize,
        mut deficits: Option<&mut BTreeMap<DeficitKey, DeficitEntry>>,
    ) -> Inventory {
        let mut snapshot = self.inventory.clone();
        let refs = self.order.refs();
        let upto = limit.min(refs.len());
        for r in &refs[..upto] {
            let reqs = match self.plan_breakdown(r) {
                Some(reqs) => reqs,
                None => {
                    debug!(id = ?r.id, "order references an unknown plan; skipping");
                    continue;
                }
            };
            for entry in &reqs.entries {
                let unmet = self.consume(&mut snapshot, entry);
                if unmet == 0 {
                    continue;
                }
                if let Some(sink) = deficits.as_deref_mut() {
                    let slot = sink.entry(self.deficit_key(entry)).or_insert_with(|| {
                        DeficitEntry {
                            kind: entry.kind.clone(),
                            name: entry.name.clone(),
                            quantity: 0,
                            rarity: entry.rarity,
                        }
                    });
                    slot.quantity = slot.quantity.saturating_add(unmet);
                }
            }
        }
        debug!(plans = upto, "replayed allocation pass");
        snapshot
    }

    /// Satisfy one entry from the snapshot, returning the unmet quantity.
    fn consume(&self, snapshot: &mut Inventory, entry: &RequirementEntry) -> u64 {
        match &entry.kind {
            EntryKind::Material(category) => {
                if let Some(hit) = self.taxonomy.resolve_group(category, &entry.name) {
                    let members = &hit.group.members;
                    let mut stocks: Vec<u64> =
                        members.iter().map(|m| snapshot.count(&m.id)).collect();
                    let unmet = allocate(&mut stocks, hit.tier, entry.quantity);
                    for (member, stock) in members.iter().zip(stocks) {
                        snapshot.materials.insert(member.id.clone(), stock);
                    }
                    unmet
                } else if let Some(material) = self.taxonomy.standalone(category, &entry.name) {
                    let taken = snapshot.take_material(&material.id, entry.quantity);
                    entry.quantity - taken
                } else {
                    // nothing in the catalog matches; the whole need stands
                    entry.quantity
                }
            }
            EntryKind::Experience(pool) => {
                let taken = snapshot.take_experience(pool, entry.quantity);
                entry.quantity - taken
            }
            EntryKind::Currency => {
                let taken = snapshot.take_credits(entry.quantity);
                entry.quantity - taken
            }
        }
    }

    fn deficit_key(&self, entry: &RequirementEntry) -> DeficitKey {
        match &entry.kind {
            EntryKind::Experience(pool) => DeficitKey {
                class: 0,
                group_rank: 0,
                rarity: 0,
                category: pool.clone(),
                name: entry.name.clone(),
            },
            EntryKind::Currency => DeficitKey {
                class: 1,
                group_rank: 0,
                rarity: 0,
                category: CategoryId(String::new()),
                name: entry.name.clone(),
            },
            EntryKind::Material(category) => {
                if let Some(hit) = self.taxonomy.resolve_group(category, &entry.name) {
                    DeficitKey {
                        class: 2,
                        group_rank: self.taxonomy.group_rank(&hit.group.id).unwrap_or(0),
                        rarity: hit.group.members[hit.tier].rarity,
                        category: category.clone(),
                        name: entry.name.clone(),
                    }
                } else {
                    DeficitKey {
                        class: 3,
                        group_rank: 0,
                        rarity: 0,
                        category: category.clone(),
                        name: entry.name.clone(),
                    }
                }
            }
        }
    }
}

/// Inventory view for one order position: the snapshot left over after
/// the higher-priority plans have been replayed.
pub struct Availability<'a> {
    taxonomy: &'a Taxonomy<'a>,
    snapshot: Inventory,
}

impl Availability<'_> {
    /// Remaining quantity for a requirement name: crafting coverage at the
    /// member's tier for grouped materials, the plain count for standalone
    /// ones, zero for names the catalog does not know.
    pub fn available_for(&self, category: &CategoryId, name: &str) -> u64 {
        if let Some(hit) = self.taxonomy.resolve_group(category, name) {
            let stocks: Vec<u64> = hit
                .group
                .members
                .iter()
                .map(|m| self.snapshot.count(&m.id))
                .collect();
            coverage(&stocks, hit.tier)
        } else if let Some(material) = self.taxonomy.standalone(category, name) {
            self.snapshot.count(&material.id)
        } else {
            0
        }
    }

    /// Remaining points in an experience pool.
    pub fn available_exp(&self, pool: &CategoryId) -> u64 {
        self.snapshot.experience_in(pool)
    }

    /// Remaining credits.
    pub fn available_credits(&self) -> u64 {
        self.snapshot.credits
    }
}
