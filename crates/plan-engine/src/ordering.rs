//! The single priority order the ledger honors.
//!
//! Character and equipment plan refs interleave freely in one sequence.
//! Mutations keep the ref set equal to the live plan-list set: `append`
//! and `remove` are the per-plan hooks, `reorder` swaps in a caller
//! permutation after checking it really is one, and `reconcile` repairs
//! an order loaded from persisted state against the current plan lists.

use plan_core::{CharacterPlan, EquipmentPlan, PlanKind, PlanRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Rejected order mutations. The order is left untouched on error.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// The replacement sequence has the wrong number of refs.
    #[error("expected {expected} refs, got {got}")]
    LengthMismatch {
        /// Current order length.
        expected: usize,
        /// Replacement length.
        got: usize,
    },
    /// The replacement sequence is not a permutation of the current refs.
    #[error("replacement refs do not match the current set")]
    MembershipMismatch,
}

/// Ordered plan refs, highest priority first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityOrder {
    refs: Vec<PlanRef>,
}

impl PriorityOrder {
    /// Default order: every character plan, then every equipment plan,
    /// each in list order.
    pub fn from_plans(characters: &[CharacterPlan], equipment: &[EquipmentPlan]) -> Self {
        let refs = characters
            .iter()
            .map(|p| PlanRef {
                kind: PlanKind::Character,
                id: p.id.clone(),
            })
            .chain(equipment.iter().map(|p| PlanRef {
                kind: PlanKind::Equipment,
                id: p.id.clone(),
            }))
            .collect();
        Self { refs }
    }

    /// The refs in priority order.
    pub fn refs(&self) -> &[PlanRef] {
        &self.refs
    }

    /// Number of refs.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// True when no plans are ordered.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Append a new plan at the lowest priority. Appending a ref already
    /// present is a no-op.
    pub fn append(&mut self, r: PlanRef) {
        if !self.refs.contains(&r) {
            self.refs.push(r);
        }
    }

    /// Remove a plan's ref, keeping the relative order of the rest.
    pub fn remove(&mut self, r: &PlanRef) {
        self.refs.retain(|existing| existing != r);
    }

    /// Replace the order with a caller-supplied permutation of the same
    /// refs. Rejects, leaving the order untouched, a sequence whose length
    /// or membership differs.
    pub fn reorder(&mut self, new: Vec<PlanRef>) -> Result<(), OrderError> {
        if new.len() != self.refs.len() {
            return Err(OrderError::LengthMismatch {
                expected: self.refs.len(),
                got: new.len(),
            });
        }
        let mut current = self.refs.clone();
        let mut proposed = new.clone();
        current.sort();
        proposed.sort();
        if current != proposed {
            return Err(OrderError::MembershipMismatch);
        }
        self.refs = new;
        Ok(())
    }

    /// Repair the order against the live plan lists: drop refs whose plan
    /// no longer exists, then append plans with no ref yet in default
    /// order. Surviving refs keep their positions.
    pub fn reconcile(&mut self, characters: &[CharacterPlan], equipment: &[EquipmentPlan]) {
        let live = Self::from_plans(characters, equipment);
        let live_set: BTreeSet<&PlanRef> = live.refs.iter().collect();
        self.refs.retain(|r| live_set.contains(r));

        let present: BTreeSet<PlanRef> = self.refs.iter().cloned().collect();
        for r in live.refs {
            if !present.contains(&r) {
                self.refs.push(r);
            }
        }
    }
}
