//! Heritage preservation tracking.
//!
//! A reporting view over the same phase data, filtered to
//! heritage-classified phases: approval status, outstanding approvals,
//! flattened approval conditions, and risk flags.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{HeritageClassification, Milestone, MilestoneType, Phase, PhaseStatus};

/// Per-phase heritage detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeritagePhaseDetail {
    /// Phase code.
    pub code: String,
    /// Phase display name.
    pub name: String,
    /// Heritage grading.
    pub classification: HeritageClassification,
    /// Conservation constraints.
    pub constraints: Vec<String>,
    /// Whether heritage approval is required.
    pub approval_required: bool,
    /// Date approval was granted, if it was.
    pub approval_date: Option<NaiveDate>,
    /// Conditions attached to the approval.
    pub approval_conditions: String,
    /// Execution status of the phase.
    pub status: PhaseStatus,
}

/// Heritage compliance view for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeritageTracker {
    /// Project identifier.
    pub project_id: i64,
    /// Number of heritage-classified phases.
    pub heritage_phase_count: usize,
    /// Phase count per classification (serialized name → count).
    pub by_classification: BTreeMap<String, usize>,
    /// Detail per heritage phase, in input order.
    pub phases: Vec<HeritagePhaseDetail>,
    /// Codes of phases requiring approval with no approval date yet.
    pub pending_approvals: Vec<String>,
    /// Flattened `"[<code>] <conditions>"` strings for phases carrying
    /// approval conditions.
    pub approval_conditions: Vec<String>,
    /// Compliance risk flags.
    pub risks: Vec<String>,
}

/// Builds the heritage compliance view.
///
/// Only phases whose classification is not `none` contribute. Risks
/// flag in-progress phases without an approval date and overdue,
/// unachieved heritage clearance milestones.
pub fn track_heritage(
    project_id: i64,
    phases: &[Phase],
    milestones: &[Milestone],
) -> HeritageTracker {
    let heritage_phases: Vec<&Phase> = phases.iter().filter(|p| p.is_heritage()).collect();

    let mut by_classification: BTreeMap<String, usize> = BTreeMap::new();
    let mut details = Vec::with_capacity(heritage_phases.len());
    let mut pending_approvals = Vec::new();
    let mut approval_conditions = Vec::new();
    let mut risks = Vec::new();

    for phase in &heritage_phases {
        *by_classification
            .entry(phase.heritage_classification.as_str().to_string())
            .or_insert(0) += 1;

        details.push(HeritagePhaseDetail {
            code: phase.code.clone(),
            name: phase.name.clone(),
            classification: phase.heritage_classification,
            constraints: phase.heritage_constraints.clone(),
            approval_required: phase.heritage_approval_required,
            approval_date: phase.heritage_approval_date,
            approval_conditions: phase.heritage_approval_conditions.clone(),
            status: phase.status,
        });

        if phase.heritage_approval_required && phase.heritage_approval_date.is_none() {
            pending_approvals.push(phase.code.clone());
        }

        if !phase.heritage_approval_conditions.is_empty() {
            approval_conditions.push(format!(
                "[{}] {}",
                phase.code, phase.heritage_approval_conditions
            ));
        }

        if phase.status == PhaseStatus::InProgress && phase.heritage_approval_date.is_none() {
            risks.push(format!(
                "Phase '{}' in progress without heritage approval",
                phase.code
            ));
        }
    }

    for milestone in milestones {
        if milestone.milestone_type == MilestoneType::HeritageClearance
            && milestone.is_overdue
            && !milestone.is_achieved()
        {
            risks.push(format!(
                "Heritage clearance milestone '{}' is overdue",
                milestone.name
            ));
        }
    }

    HeritageTracker {
        project_id,
        heritage_phase_count: heritage_phases.len(),
        by_classification,
        phases: details,
        pending_approvals,
        approval_conditions,
        risks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhaseType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn heritage_phase(id: i64, code: &str, grade: HeritageClassification) -> Phase {
        Phase::new(id, code, PhaseType::HeritageRestoration)
            .with_name(format!("Restoration {code}"))
            .with_heritage(grade)
    }

    #[test]
    fn test_filters_to_heritage_phases() {
        let phases = vec![
            Phase::new(1, "PH-01", PhaseType::Demolition),
            heritage_phase(2, "HR-01", HeritageClassification::Grade2),
            heritage_phase(3, "HR-02", HeritageClassification::Grade2),
        ];
        let tracker = track_heritage(1, &phases, &[]);
        assert_eq!(tracker.heritage_phase_count, 2);
        assert_eq!(tracker.phases.len(), 2);
        assert_eq!(tracker.by_classification["grade_2"], 2);
        assert!(!tracker.by_classification.contains_key("none"));
    }

    #[test]
    fn test_pending_approvals() {
        let phases = vec![
            heritage_phase(1, "HR-01", HeritageClassification::Grade1).with_approval_required(true),
            heritage_phase(2, "HR-02", HeritageClassification::Grade1)
                .with_approval_required(true)
                .with_approval_date(date(2024, 2, 1)),
        ];
        let tracker = track_heritage(1, &phases, &[]);
        assert_eq!(tracker.pending_approvals, vec!["HR-01".to_string()]);
    }

    #[test]
    fn test_approval_conditions_flattened() {
        let phases = vec![
            heritage_phase(1, "HR-01", HeritageClassification::Grade2)
                .with_approval_conditions("Retain original cornices"),
            heritage_phase(2, "HR-02", HeritageClassification::Grade2),
        ];
        let tracker = track_heritage(1, &phases, &[]);
        assert_eq!(
            tracker.approval_conditions,
            vec!["[HR-01] Retain original cornices".to_string()]
        );
    }

    #[test]
    fn test_in_progress_without_approval_risk() {
        let phases = vec![heritage_phase(1, "HR-01", HeritageClassification::Grade1)
            .with_status(PhaseStatus::InProgress)];
        let tracker = track_heritage(1, &phases, &[]);
        assert!(tracker
            .risks
            .contains(&"Phase 'HR-01' in progress without heritage approval".to_string()));
    }

    #[test]
    fn test_approved_in_progress_phase_is_not_a_risk() {
        let phases = vec![heritage_phase(1, "HR-01", HeritageClassification::Grade1)
            .with_status(PhaseStatus::InProgress)
            .with_approval_date(date(2024, 1, 15))];
        let tracker = track_heritage(1, &phases, &[]);
        assert!(tracker.risks.is_empty());
    }

    #[test]
    fn test_overdue_clearance_milestone_risk() {
        let milestones = vec![
            Milestone::new(
                1,
                10,
                "North wing clearance",
                MilestoneType::HeritageClearance,
                date(2024, 3, 1),
            )
            .with_overdue(true),
            // Achieved: overdue flag is stale, not a risk.
            Milestone::new(
                2,
                10,
                "South wing clearance",
                MilestoneType::HeritageClearance,
                date(2024, 3, 1),
            )
            .with_overdue(true)
            .with_actual_date(date(2024, 3, 5)),
            // Overdue but not a clearance milestone.
            Milestone::new(3, 10, "Permit", MilestoneType::PermitGranted, date(2024, 3, 1))
                .with_overdue(true),
        ];
        let tracker = track_heritage(1, &[], &milestones);
        assert_eq!(
            tracker.risks,
            vec!["Heritage clearance milestone 'North wing clearance' is overdue".to_string()]
        );
    }

    #[test]
    fn test_empty_input() {
        let tracker = track_heritage(1, &[], &[]);
        assert_eq!(tracker.heritage_phase_count, 0);
        assert!(tracker.phases.is_empty());
        assert!(tracker.pending_approvals.is_empty());
        assert!(tracker.risks.is_empty());
    }
}
