#![deny(warnings)]

//! Material requirement and inventory allocation engine for Restock.
//!
//! Four layers, leaf first: [`crafting`] converts surplus low-tier
//! materials upward at a fixed 3:1 ratio; [`resolve`] maps requirement
//! names onto catalog groups and standalone materials; [`requirements`]
//! turns one plan's progression delta into an itemized requirement list;
//! [`ledger`] replays the whole priority order against a snapshot of the
//! shared inventory, answering availability and deficit queries.
//! [`ordering`] maintains the priority order itself.
//!
//! Every computation is a pure replay over borrowed inputs; the engine
//! never mutates the caller's inventory and never fails. Malformed
//! ranges degrade to empty requirements and unresolvable names to
//! placeholder entries.

pub mod crafting;
pub mod ledger;
pub mod ordering;
pub mod requirements;
pub mod resolve;

pub use crafting::{allocate, coverage, CONVERSION_RATIO};
pub use ledger::{Availability, Ledger};
pub use ordering::{OrderError, PriorityOrder};
pub use requirements::{character_requirements, equipment_requirements};
pub use resolve::{find_member, find_standalone, GroupHit, Taxonomy};
