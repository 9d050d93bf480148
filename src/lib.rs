//! Multi-phase development scheduling engine.
//!
//! Turns a set of construction/renovation phases with inter-phase
//! dependencies into a renderable Gantt timeline, a Critical-Path-Method
//! (CPM) analysis, a heritage-preservation compliance view, and a
//! tenant-relocation coordination summary.
//!
//! The engine is a pure function of its inputs: it reads caller-supplied
//! in-memory collections, performs no I/O, never consults a system clock
//! (any "today" is a parameter), and returns fresh value objects on every
//! call. Persistence and presentation are the caller's concern.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Phase`, `PhaseDependency`, `Milestone`,
//!   `TenantRelocation` and their enumerations
//! - **`validation`**: Dependency referential integrity and cycle detection
//! - **`cpm`**: Forward/backward-pass critical path analysis
//! - **`gantt`**: Timeline projection with completion and risk warnings
//! - **`heritage`**: Heritage-classified phase compliance tracking
//! - **`tenant`**: Relocation counts, costs, timeline and warnings
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

pub mod cpm;
pub mod gantt;
pub mod heritage;
pub mod models;
pub mod tenant;
pub mod validation;
