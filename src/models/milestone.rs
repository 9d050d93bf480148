//! Milestone model.
//!
//! A milestone is a dated checkpoint attached to exactly one phase.
//! "Achieved" is derived from the presence of an actual date; "overdue"
//! is supplied by the caller so the engine never consults a clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of a milestone checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneType {
    DesignApproval,
    PermitGranted,
    HeritageClearance,
    Inspection,
    PracticalCompletion,
    Handover,
}

/// A dated checkpoint attached to one phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique milestone identifier.
    pub id: i64,
    /// Owning phase ID.
    pub phase_id: i64,
    /// Display name.
    pub name: String,
    /// Checkpoint category.
    pub milestone_type: MilestoneType,
    /// Date the milestone is planned to be reached.
    pub planned_date: NaiveDate,
    /// Date it was actually reached, if it was.
    pub actual_date: Option<NaiveDate>,
    /// Planned date has passed with no actual date. Caller-computed
    /// against its own "today".
    pub is_overdue: bool,
    /// Whether reaching this milestone requires a sign-off.
    pub requires_approval: bool,
    /// Free-text approval status.
    pub approval_status: Option<String>,
}

impl Milestone {
    /// Creates a new milestone.
    pub fn new(
        id: i64,
        phase_id: i64,
        name: impl Into<String>,
        milestone_type: MilestoneType,
        planned_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            phase_id,
            name: name.into(),
            milestone_type,
            planned_date,
            actual_date: None,
            is_overdue: false,
            requires_approval: false,
            approval_status: None,
        }
    }

    /// Sets the actual date (marks the milestone achieved).
    pub fn with_actual_date(mut self, date: NaiveDate) -> Self {
        self.actual_date = Some(date);
        self
    }

    /// Flags the milestone as overdue.
    pub fn with_overdue(mut self, overdue: bool) -> Self {
        self.is_overdue = overdue;
        self
    }

    /// Requires approval for this milestone.
    pub fn with_approval_required(mut self, required: bool) -> Self {
        self.requires_approval = required;
        self
    }

    /// Sets the approval status text.
    pub fn with_approval_status(mut self, status: impl Into<String>) -> Self {
        self.approval_status = Some(status.into());
        self
    }

    /// Whether the milestone has been reached.
    pub fn is_achieved(&self) -> bool {
        self.actual_date.is_some()
    }
}
