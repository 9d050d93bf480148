//! Phase model.
//!
//! A phase is a unit of construction or renovation work with planned and
//! actual dates, typed dependencies on predecessor phases, and optional
//! heritage-preservation metadata.
//!
//! # Time Representation
//! All dates are day-granular civil dates (`chrono::NaiveDate`); all
//! durations and lags are whole days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fallback duration for a phase with no explicit duration and no
/// planned date range, in days.
pub const DEFAULT_PHASE_DURATION_DAYS: i64 = 30;

/// Category of construction/renovation work a phase performs.
///
/// Serialized by snake_case name; external consumers match on the
/// string values, so variants must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseType {
    Demolition,
    SitePreparation,
    Foundation,
    Structure,
    Envelope,
    MepRoughIn,
    InteriorFitOut,
    Facade,
    Landscaping,
    Commissioning,
    Handover,
    HeritageAssessment,
    HeritageRestoration,
    HeritageIntegration,
    TenantRelocation,
    SoftStrip,
    Refurbishment,
    TenantFitOut,
    RetailPodium,
    OfficeFloors,
    ResidentialTower,
    AmenityLevel,
}

impl PhaseType {
    /// The serialized snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demolition => "demolition",
            Self::SitePreparation => "site_preparation",
            Self::Foundation => "foundation",
            Self::Structure => "structure",
            Self::Envelope => "envelope",
            Self::MepRoughIn => "mep_rough_in",
            Self::InteriorFitOut => "interior_fit_out",
            Self::Facade => "facade",
            Self::Landscaping => "landscaping",
            Self::Commissioning => "commissioning",
            Self::Handover => "handover",
            Self::HeritageAssessment => "heritage_assessment",
            Self::HeritageRestoration => "heritage_restoration",
            Self::HeritageIntegration => "heritage_integration",
            Self::TenantRelocation => "tenant_relocation",
            Self::SoftStrip => "soft_strip",
            Self::Refurbishment => "refurbishment",
            Self::TenantFitOut => "tenant_fit_out",
            Self::RetailPodium => "retail_podium",
            Self::OfficeFloors => "office_floors",
            Self::ResidentialTower => "residential_tower",
            Self::AmenityLevel => "amenity_level",
        }
    }
}

/// Execution status of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    NotStarted,
    InProgress,
    Delayed,
    Completed,
}

/// How a successor's schedule is constrained by its predecessor's.
///
/// Finish-to-finish folds into the finish-to-start lag formula in this
/// engine: both anchor on the predecessor's earliest finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    FinishToStart,
    StartToStart,
    FinishToFinish,
}

/// Heritage grading of the asset a phase touches.
///
/// Anything other than `None` triggers approval tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeritageClassification {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "grade_1")]
    Grade1,
    #[serde(rename = "grade_2")]
    Grade2,
    #[serde(rename = "grade_3")]
    Grade3,
}

impl HeritageClassification {
    /// The serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grade1 => "grade_1",
            Self::Grade2 => "grade_2",
            Self::Grade3 => "grade_3",
        }
    }
}

/// Occupancy state of the area a phase works in. Display only — no
/// engine component branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyStatus {
    Vacant,
    PartiallyOccupied,
    Occupied,
    Decanted,
}

/// A typed, lagged dependency on a predecessor phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDependency {
    /// ID of the predecessor phase.
    pub predecessor_id: i64,
    /// Constraint relating this phase's schedule to the predecessor's.
    pub dependency_type: DependencyType,
    /// Offset in days applied to the constraint.
    pub lag_days: i64,
}

impl PhaseDependency {
    /// Creates a finish-to-start dependency with zero lag.
    pub fn finish_to_start(predecessor_id: i64) -> Self {
        Self {
            predecessor_id,
            dependency_type: DependencyType::FinishToStart,
            lag_days: 0,
        }
    }

    /// Creates a start-to-start dependency with zero lag.
    pub fn start_to_start(predecessor_id: i64) -> Self {
        Self {
            predecessor_id,
            dependency_type: DependencyType::StartToStart,
            lag_days: 0,
        }
    }

    /// Sets the lag in days.
    pub fn with_lag(mut self, lag_days: i64) -> Self {
        self.lag_days = lag_days;
        self
    }
}

/// A unit of construction/renovation work.
///
/// Actual dates override planned dates wherever both are present.
/// `is_critical_path` is a cached flag, typically populated from a
/// [`crate::cpm::CriticalPathResult`] before building a Gantt chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Unique phase identifier within the project.
    pub id: i64,
    /// Short human-readable code (e.g. "PH-02").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Category of work.
    pub phase_type: PhaseType,
    /// Execution status.
    pub status: PhaseStatus,
    /// Planned start date.
    pub planned_start: Option<NaiveDate>,
    /// Planned end date.
    pub planned_end: Option<NaiveDate>,
    /// Actual start date, when work has begun.
    pub actual_start: Option<NaiveDate>,
    /// Actual end date, when work has finished.
    pub actual_end: Option<NaiveDate>,
    /// Explicit duration override in days. `None` = derive from planned
    /// dates, falling back to [`DEFAULT_PHASE_DURATION_DAYS`].
    pub duration_days: Option<i64>,
    /// Cached critical-path membership flag.
    pub is_critical_path: bool,
    /// Completion percentage (0–100).
    pub completion_pct: f64,
    /// Heritage grading of the touched asset.
    pub heritage_classification: HeritageClassification,
    /// Free-text conservation constraints.
    pub heritage_constraints: Vec<String>,
    /// Whether heritage approval is required before work proceeds.
    pub heritage_approval_required: bool,
    /// Date heritage approval was granted, if it was.
    pub heritage_approval_date: Option<NaiveDate>,
    /// Free-text conditions attached to the approval.
    pub heritage_approval_conditions: String,
    /// Occupancy of the work area, for display.
    pub occupancy_status: Option<OccupancyStatus>,
    /// Ordered dependencies on predecessor phases.
    pub dependencies: Vec<PhaseDependency>,
}

impl Phase {
    /// Creates a new phase with the given ID and code.
    pub fn new(id: i64, code: impl Into<String>, phase_type: PhaseType) -> Self {
        Self {
            id,
            code: code.into(),
            name: String::new(),
            phase_type,
            status: PhaseStatus::NotStarted,
            planned_start: None,
            planned_end: None,
            actual_start: None,
            actual_end: None,
            duration_days: None,
            is_critical_path: false,
            completion_pct: 0.0,
            heritage_classification: HeritageClassification::None,
            heritage_constraints: Vec::new(),
            heritage_approval_required: false,
            heritage_approval_date: None,
            heritage_approval_conditions: String::new(),
            occupancy_status: None,
            dependencies: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the execution status.
    pub fn with_status(mut self, status: PhaseStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the planned date range.
    pub fn with_planned_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.planned_start = Some(start);
        self.planned_end = Some(end);
        self
    }

    /// Sets the actual start date.
    pub fn with_actual_start(mut self, date: NaiveDate) -> Self {
        self.actual_start = Some(date);
        self
    }

    /// Sets the actual end date.
    pub fn with_actual_end(mut self, date: NaiveDate) -> Self {
        self.actual_end = Some(date);
        self
    }

    /// Sets the explicit duration override.
    pub fn with_duration_days(mut self, days: i64) -> Self {
        self.duration_days = Some(days);
        self
    }

    /// Sets the completion percentage.
    pub fn with_completion(mut self, pct: f64) -> Self {
        self.completion_pct = pct;
        self
    }

    /// Marks the phase as on the critical path.
    pub fn with_critical(mut self, critical: bool) -> Self {
        self.is_critical_path = critical;
        self
    }

    /// Sets the heritage classification.
    pub fn with_heritage(mut self, classification: HeritageClassification) -> Self {
        self.heritage_classification = classification;
        self
    }

    /// Adds a conservation constraint.
    pub fn with_heritage_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.heritage_constraints.push(constraint.into());
        self
    }

    /// Requires heritage approval for this phase.
    pub fn with_approval_required(mut self, required: bool) -> Self {
        self.heritage_approval_required = required;
        self
    }

    /// Sets the heritage approval date.
    pub fn with_approval_date(mut self, date: NaiveDate) -> Self {
        self.heritage_approval_date = Some(date);
        self
    }

    /// Sets the heritage approval conditions text.
    pub fn with_approval_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.heritage_approval_conditions = conditions.into();
        self
    }

    /// Sets the occupancy status.
    pub fn with_occupancy(mut self, occupancy: OccupancyStatus) -> Self {
        self.occupancy_status = Some(occupancy);
        self
    }

    /// Adds a dependency on a predecessor phase.
    pub fn with_dependency(mut self, dependency: PhaseDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Duration used for scheduling, in days.
    ///
    /// Resolution order: explicit `duration_days`, then the planned date
    /// range, then [`DEFAULT_PHASE_DURATION_DAYS`].
    pub fn scheduling_duration_days(&self) -> i64 {
        if let Some(days) = self.duration_days {
            return days;
        }
        match (self.planned_start, self.planned_end) {
            (Some(start), Some(end)) => (end - start).num_days(),
            _ => DEFAULT_PHASE_DURATION_DAYS,
        }
    }

    /// Whether this phase touches a heritage-classified asset.
    pub fn is_heritage(&self) -> bool {
        self.heritage_classification != HeritageClassification::None
    }

    /// Whether this phase has any predecessors.
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_phase_builder() {
        let phase = Phase::new(1, "PH-01", PhaseType::Demolition)
            .with_name("Soft strip and demolition")
            .with_status(PhaseStatus::InProgress)
            .with_planned_dates(date(2024, 1, 1), date(2024, 2, 15))
            .with_completion(40.0)
            .with_occupancy(OccupancyStatus::Vacant)
            .with_dependency(PhaseDependency::finish_to_start(7).with_lag(5));

        assert_eq!(phase.id, 1);
        assert_eq!(phase.code, "PH-01");
        assert_eq!(phase.status, PhaseStatus::InProgress);
        assert_eq!(phase.dependencies.len(), 1);
        assert_eq!(phase.dependencies[0].predecessor_id, 7);
        assert_eq!(phase.dependencies[0].lag_days, 5);
        assert!(!phase.is_heritage());
    }

    #[test]
    fn test_duration_resolution_explicit() {
        let phase = Phase::new(1, "PH-01", PhaseType::Structure)
            .with_planned_dates(date(2024, 1, 1), date(2024, 1, 11))
            .with_duration_days(42);
        // Explicit override wins over the planned range
        assert_eq!(phase.scheduling_duration_days(), 42);
    }

    #[test]
    fn test_duration_resolution_derived() {
        let phase = Phase::new(1, "PH-01", PhaseType::Structure)
            .with_planned_dates(date(2024, 1, 1), date(2024, 1, 11));
        assert_eq!(phase.scheduling_duration_days(), 10);
    }

    #[test]
    fn test_duration_resolution_fallback() {
        let phase = Phase::new(1, "PH-01", PhaseType::Structure);
        assert_eq!(
            phase.scheduling_duration_days(),
            DEFAULT_PHASE_DURATION_DAYS
        );
    }

    #[test]
    fn test_heritage_flag() {
        let graded = Phase::new(1, "HR-01", PhaseType::HeritageRestoration)
            .with_heritage(HeritageClassification::Grade2);
        assert!(graded.is_heritage());

        let plain = Phase::new(2, "PH-02", PhaseType::Foundation);
        assert!(!plain.is_heritage());
    }

    #[test]
    fn test_enum_serialized_names() {
        let ty = serde_json::to_string(&PhaseType::MepRoughIn).unwrap();
        assert_eq!(ty, "\"mep_rough_in\"");
        let dep = serde_json::to_string(&DependencyType::FinishToStart).unwrap();
        assert_eq!(dep, "\"finish_to_start\"");
        let grade = serde_json::to_string(&HeritageClassification::Grade2).unwrap();
        assert_eq!(grade, "\"grade_2\"");
        assert_eq!(PhaseType::HeritageAssessment.as_str(), "heritage_assessment");
    }
}
