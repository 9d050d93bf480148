//! Scheduling domain models.
//!
//! Provides the data types for a single project's phase graph: phases
//! with typed dependencies, dated milestones, and tenant relocation
//! records for occupied-building renovations. Pure data — all behavior
//! lives in the engine modules that consume these types.
//!
//! All entities are supplied by the caller as already-materialized
//! collections; the engine never creates, persists, or deletes them.

mod milestone;
mod phase;
mod relocation;

pub use milestone::{Milestone, MilestoneType};
pub use phase::{
    DependencyType, HeritageClassification, OccupancyStatus, Phase, PhaseDependency, PhaseStatus,
    PhaseType, DEFAULT_PHASE_DURATION_DAYS,
};
pub use relocation::{RelocationStatus, TenantRelocation};
