//! Material name resolution against catalog bindings.
//!
//! Two scopes exist. Per-entity resolution ([`find_member`],
//! [`find_standalone`]) searches one entity's own bindings and backs the
//! requirement calculator. The catalog-wide [`Taxonomy`] unions every
//! entity's bindings, deduplicates groups, and assigns each group a
//! deterministic rank; the ledger resolves requirement names against it
//! during replay and uses the rank to order deficits.

use plan_core::{Catalog, CatalogDetail, CategoryId, GroupId, Material, MaterialGroup};
use std::collections::BTreeMap;
use tracing::debug;

/// A named material located inside a crafting group.
#[derive(Clone, Copy, Debug)]
pub struct GroupHit<'a> {
    /// The group containing the member.
    pub group: &'a MaterialGroup,
    /// Member position, lowest tier first.
    pub tier: usize,
}

/// Find a member by display name in a category's group list. First match
/// wins; a material belongs to at most one group per category.
pub fn find_member<'a>(groups: &'a [MaterialGroup], name: &str) -> Option<GroupHit<'a>> {
    for group in groups {
        if let Some(tier) = group.members.iter().position(|m| m.name == name) {
            return Some(GroupHit { group, tier });
        }
    }
    None
}

/// Find a standalone material by display name across an entity's bindings.
pub fn find_standalone<'a>(detail: &'a CatalogDetail, name: &str) -> Option<&'a Material> {
    detail.materials.values().find(|m| m.name == name)
}

/// Catalog-wide resolution index.
///
/// Groups are deduplicated by id and ranked by `(category, group id)`;
/// the first binding encountered for an id wins. Standalone materials are
/// collected per `(category, name)`.
pub struct Taxonomy<'a> {
    groups: Vec<&'a MaterialGroup>,
    rank_by_id: BTreeMap<&'a GroupId, usize>,
    member_locations: BTreeMap<(&'a CategoryId, &'a str), (usize, usize)>,
    standalone: BTreeMap<(&'a CategoryId, &'a str), &'a Material>,
}

impl<'a> Taxonomy<'a> {
    /// Build the index from every entity's bindings.
    pub fn from_catalog(catalog: &'a Catalog) -> Self {
        let mut unique: BTreeMap<(&CategoryId, &GroupId), &MaterialGroup> = BTreeMap::new();
        let mut standalone: BTreeMap<(&CategoryId, &str), &Material> = BTreeMap::new();
        for detail in catalog.details.values() {
            for groups in detail.groups.values() {
                for group in groups {
                    unique.entry((&group.category, &group.id)).or_insert(group);
                }
            }
            for material in detail.materials.values() {
                standalone
                    .entry((&material.category, material.name.as_str()))
                    .or_insert(material);
            }
        }

        let groups: Vec<&MaterialGroup> = unique.into_values().collect();
        let mut rank_by_id = BTreeMap::new();
        let mut member_locations = BTreeMap::new();
        for (rank, group) in groups.iter().enumerate() {
            rank_by_id.entry(&group.id).or_insert(rank);
            for (tier, member) in group.members.iter().enumerate() {
                member_locations
                    .entry((&group.category, member.name.as_str()))
                    .or_insert((rank, tier));
            }
        }

        debug!(
            groups = groups.len(),
            members = member_locations.len(),
            standalone = standalone.len(),
            "built catalog taxonomy"
        );
        Self {
            groups,
            rank_by_id,
            member_locations,
            standalone,
        }
    }

    /// Locate a grouped material by category and display name.
    pub fn resolve_group(&self, category: &CategoryId, name: &str) -> Option<GroupHit<'a>> {
        let &(rank, tier) = self.member_locations.get(&(category, name))?;
        Some(GroupHit {
            group: self.groups[rank],
            tier,
        })
    }

    /// Locate a standalone material by category and display name.
    pub fn standalone(&self, category: &CategoryId, name: &str) -> Option<&'a Material> {
        self.standalone.get(&(category, name)).copied()
    }

    /// Rank of a group in the deterministic `(category, group id)` order.
    pub fn group_rank(&self, id: &GroupId) -> Option<usize> {
        self.rank_by_id.get(id).copied()
    }

    /// Number of distinct groups indexed.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
