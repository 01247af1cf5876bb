//! # Engine Data Model
//!
//! The DTOs that cross the engine's boundary: work items in, analytics out.
//!
//! Design rule: this module is pure data — no I/O, no state, no lookups.
//! Every type derives serde so the boundary is directly JSON-shaped for
//! whatever data layer or UI sits on either side.

pub mod relation;
pub mod snapshot;
pub mod work_item;

pub use relation::Relation;
pub use snapshot::WeekSnapshot;
pub use work_item::{Collaborator, RiskLevel, WorkItem};
