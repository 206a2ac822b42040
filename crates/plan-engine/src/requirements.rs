//! Requirement calculation for a single plan.
//!
//! Walks the delta between a plan's current and target progression
//! coordinates, sums the crossed cost rows, resolves tiered and named
//! amounts against the entity's catalog bindings, and emits one merged,
//! deterministically ordered [`Requirements`] value. Pure; inverted or
//! out-of-table ranges simply contribute nothing.

use crate::resolve::find_member;
use plan_core::{
    CatalogDetail, CategoryId, CharacterCostTable, CharacterPlan, CostRow, EntryKind,
    EquipmentCostTable, EquipmentPlan, RequirementEntry, Requirements, RowAmount, CREDITS_NAME,
    UNKNOWN_NAME,
};
use std::collections::BTreeMap;

/// Brackets or levels crossed moving from `current` to `target`: every
/// value strictly greater than `current` and at most `target`. Empty when
/// the range is inverted.
fn crossed(current: u8, target: u8) -> impl Iterator<Item = u8> {
    (u16::from(current) + 1..=u16::from(target)).map(|v| v as u8)
}

struct Slot {
    quantity: u64,
    rarity: Option<u8>,
    grouped: bool,
}

/// Sort key for the presentation contract: grouped materials ascending
/// `(category, rarity, name)`, then fixed or unresolved materials
/// `(category, name)`, then experience, then currency.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct EntryOrder {
    class: u8,
    category: CategoryId,
    rarity: u8,
    name: String,
}

#[derive(Default)]
struct Accumulator {
    entries: BTreeMap<(EntryKind, String), Slot>,
    credits: u64,
}

impl Accumulator {
    fn add(
        &mut self,
        kind: EntryKind,
        name: String,
        quantity: u64,
        rarity: Option<u8>,
        grouped: bool,
    ) {
        if quantity == 0 {
            return;
        }
        let slot = self.entries.entry((kind, name)).or_insert(Slot {
            quantity: 0,
            rarity: None,
            grouped: false,
        });
        slot.quantity = slot.quantity.saturating_add(quantity);
        if slot.rarity.is_none() {
            slot.rarity = rarity;
        }
        slot.grouped |= grouped;
    }

    fn add_row(&mut self, row: &CostRow, detail: Option<&CatalogDetail>) {
        self.credits = self.credits.saturating_add(row.credits);
        for cost in &row.items {
            match &cost.amount {
                RowAmount::Named { name, quantity } => {
                    self.add_named(&cost.category, name, *quantity, detail);
                }
                RowAmount::Tiered { quantities } => {
                    self.add_tiered(&cost.category, quantities, detail);
                }
            }
        }
    }

    fn add_named(
        &mut self,
        category: &CategoryId,
        name: &str,
        quantity: u64,
        detail: Option<&CatalogDetail>,
    ) {
        let groups = detail.and_then(|d| d.groups.get(category));
        if let Some(hit) = groups.and_then(|gs| find_member(gs, name)) {
            let rarity = hit.group.members[hit.tier].rarity;
            self.add(
                EntryKind::Material(category.clone()),
                name.to_string(),
                quantity,
                Some(rarity),
                true,
            );
            return;
        }
        let rarity = detail
            .and_then(|d| d.materials.get(category))
            .filter(|m| m.name == name)
            .map(|m| m.rarity);
        self.add(
            EntryKind::Material(category.clone()),
            name.to_string(),
            quantity,
            rarity,
            false,
        );
    }

    fn add_tiered(
        &mut self,
        category: &CategoryId,
        quantities: &[u64],
        detail: Option<&CatalogDetail>,
    ) {
        let binding = detail
            .and_then(|d| d.groups.get(category))
            .and_then(|gs| gs.first());
        if let Some(group) = binding {
            for (tier, &quantity) in quantities.iter().enumerate() {
                if quantity == 0 {
                    continue;
                }
                match group.members.get(tier) {
                    Some(member) => self.add(
                        EntryKind::Material(category.clone()),
                        member.name.clone(),
                        quantity,
                        Some(member.rarity),
                        true,
                    ),
                    // quantities longer than the chain keep their totals
                    None => self.add(
                        EntryKind::Material(category.clone()),
                        UNKNOWN_NAME.to_string(),
                        quantity,
                        None,
                        false,
                    ),
                }
            }
            return;
        }

        let total = quantities.iter().fold(0u64, |acc, &q| acc.saturating_add(q));
        if let Some(material) = detail.and_then(|d| d.materials.get(category)) {
            self.add(
                EntryKind::Material(category.clone()),
                material.name.clone(),
                total,
                Some(material.rarity),
                false,
            );
        } else {
            self.add(
                EntryKind::Material(category.clone()),
                UNKNOWN_NAME.to_string(),
                total,
                None,
                false,
            );
        }
    }

    fn finish(mut self, exp: u64, pool: &CategoryId) -> Requirements {
        if exp > 0 {
            self.add(
                EntryKind::Experience(pool.clone()),
                pool.0.clone(),
                exp,
                None,
                false,
            );
        }
        let credits = self.credits;
        if credits > 0 {
            self.add(EntryKind::Currency, CREDITS_NAME.to_string(), credits, None, false);
        }

        let mut ordered: Vec<(EntryOrder, RequirementEntry)> = self
            .entries
            .into_iter()
            .map(|((kind, name), slot)| {
                let order = match &kind {
                    EntryKind::Material(category) => EntryOrder {
                        class: if slot.grouped { 0 } else { 1 },
                        category: category.clone(),
                        rarity: if slot.grouped { slot.rarity.unwrap_or(0) } else { 0 },
                        name: name.clone(),
                    },
                    EntryKind::Experience(category) => EntryOrder {
                        class: 2,
                        category: category.clone(),
                        rarity: 0,
                        name: name.clone(),
                    },
                    EntryKind::Currency => EntryOrder {
                        class: 3,
                        category: CategoryId(String::new()),
                        rarity: 0,
                        name: name.clone(),
                    },
                };
                let entry = RequirementEntry {
                    kind,
                    name,
                    quantity: slot.quantity,
                    rarity: slot.rarity,
                };
                (order, entry)
            })
            .collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0));

        Requirements {
            credits,
            entries: ordered.into_iter().map(|(_, entry)| entry).collect(),
        }
    }
}

/// Full requirements to move a character plan from current to target:
/// crossed ascension brackets, per-slot skill levels (a slot absent from
/// the current map starts at level 1), newly selected nodes, and the
/// summed level experience.
pub fn character_requirements(
    plan: &CharacterPlan,
    detail: Option<&CatalogDetail>,
    table: &CharacterCostTable,
) -> Requirements {
    let mut acc = Accumulator::default();

    for bracket in crossed(plan.current.ascension, plan.target.ascension) {
        if let Some(row) = table.ascensions.get(&bracket) {
            acc.add_row(row, detail);
        }
    }

    for (slot, &target_level) in &plan.target.skills {
        let current_level = plan.current.skills.get(slot).copied().unwrap_or(1);
        for level in crossed(current_level, target_level) {
            if let Some(row) = table.skill_levels.get(&level) {
                acc.add_row(row, detail);
            }
        }
    }

    for node in plan.target.nodes.difference(&plan.current.nodes) {
        if let Some(row) = table.nodes.get(node) {
            acc.add_row(row, detail);
        }
    }

    let mut exp = 0u64;
    for level in crossed(plan.current.level, plan.target.level) {
        exp = exp.saturating_add(table.level_exp.get(&level).copied().unwrap_or(0));
    }

    acc.finish(exp, &table.exp_category)
}

/// Full requirements to move an equipment plan from current to target:
/// crossed ascension brackets plus the summed level experience.
pub fn equipment_requirements(
    plan: &EquipmentPlan,
    detail: Option<&CatalogDetail>,
    table: &EquipmentCostTable,
) -> Requirements {
    let mut acc = Accumulator::default();

    for bracket in crossed(plan.current.ascension, plan.target.ascension) {
        if let Some(row) = table.ascensions.get(&bracket) {
            acc.add_row(row, detail);
        }
    }

    let mut exp = 0u64;
    for level in crossed(plan.current.level, plan.target.level) {
        exp = exp.saturating_add(table.level_exp.get(&level).copied().unwrap_or(0));
    }

    acc.finish(exp, &table.exp_category)
}
