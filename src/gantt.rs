//! Gantt chart projection.
//!
//! Projects phases and milestones into a renderable timeline: per-task
//! bars with resolved dates and display colors, project-level aggregates
//! (span, duration-weighted completion), the critical-path id list, and
//! schedule-risk warnings.
//!
//! The builder computes nothing the presentation layer couldn't — it
//! exists so every consumer resolves fallback dates, completion
//! weighting, and warning strings identically.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{
    Milestone, MilestoneType, OccupancyStatus, Phase, PhaseStatus, PhaseType,
    DEFAULT_PHASE_DURATION_DAYS,
};

/// One phase projected onto the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanttTask {
    /// Phase ID.
    pub id: i64,
    /// Phase code.
    pub code: String,
    /// Phase display name.
    pub name: String,
    /// Category of work.
    pub phase_type: PhaseType,
    /// Resolved bar start (actual, else planned, else "today").
    pub start: NaiveDate,
    /// Resolved bar end (actual, else planned, else start + 30 days).
    pub end: NaiveDate,
    /// Bar length in days.
    pub duration_days: i64,
    /// Completion percentage (0–100), copied from the phase.
    pub completion_pct: f64,
    /// Execution status, copied from the phase.
    pub status: PhaseStatus,
    /// Cached critical-path flag, copied from the phase.
    pub is_critical: bool,
    /// Display color (hex), keyed by phase type.
    pub color: String,
    /// Occupancy tag for display.
    pub occupancy_status: Option<OccupancyStatus>,
}

/// One milestone projected for display. Pure field copying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanttMilestone {
    /// Milestone ID.
    pub id: i64,
    /// Owning phase ID.
    pub phase_id: i64,
    /// Display name.
    pub name: String,
    /// Checkpoint category.
    pub milestone_type: MilestoneType,
    /// Planned date.
    pub planned_date: NaiveDate,
    /// Actual date, when reached.
    pub actual_date: Option<NaiveDate>,
    /// Whether the milestone has been reached.
    pub is_achieved: bool,
    /// Caller-computed overdue flag.
    pub is_overdue: bool,
    /// Whether a sign-off is required.
    pub requires_approval: bool,
    /// Free-text approval status.
    pub approval_status: Option<String>,
}

/// A renderable project timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanttChart {
    /// Project identifier.
    pub project_id: i64,
    /// Project display name.
    pub project_name: String,
    /// Timeline bars, in input phase order.
    pub tasks: Vec<GanttTask>,
    /// Projected milestones, in input order.
    pub milestones: Vec<GanttMilestone>,
    /// Earliest task start.
    pub project_start: NaiveDate,
    /// Latest task end.
    pub project_end: NaiveDate,
    /// Project span in days.
    pub total_duration_days: i64,
    /// Duration-weighted average of task completion percentages.
    pub overall_completion_pct: f64,
    /// IDs of tasks flagged critical.
    pub critical_path: Vec<i64>,
    /// Task count per phase type (serialized name → count).
    pub phases_summary: BTreeMap<String, usize>,
    /// Schedule-risk warnings.
    pub warnings: Vec<String>,
}

/// Stateless Gantt chart builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct GanttChartBuilder;

impl GanttChartBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Builds a chart for one project.
    ///
    /// `today` is the caller's current date, used only as the fallback
    /// start for phases with no dates at all and as the degenerate
    /// project span for empty input.
    pub fn build(
        &self,
        project_id: i64,
        project_name: &str,
        phases: &[Phase],
        milestones: &[Milestone],
        today: NaiveDate,
    ) -> GanttChart {
        if phases.is_empty() {
            return GanttChart {
                project_id,
                project_name: project_name.to_string(),
                tasks: Vec::new(),
                milestones: Vec::new(),
                project_start: today,
                project_end: today,
                total_duration_days: 0,
                overall_completion_pct: 0.0,
                critical_path: Vec::new(),
                phases_summary: BTreeMap::new(),
                warnings: vec!["No phases defined".to_string()],
            };
        }

        let mut tasks = Vec::with_capacity(phases.len());
        let mut phases_summary: BTreeMap<String, usize> = BTreeMap::new();

        for phase in phases {
            let start = phase.actual_start.or(phase.planned_start).unwrap_or(today);
            let end = phase
                .actual_end
                .or(phase.planned_end)
                .unwrap_or(start + Duration::days(DEFAULT_PHASE_DURATION_DAYS));

            *phases_summary
                .entry(phase.phase_type.as_str().to_string())
                .or_insert(0) += 1;

            tasks.push(GanttTask {
                id: phase.id,
                code: phase.code.clone(),
                name: phase.name.clone(),
                phase_type: phase.phase_type,
                start,
                end,
                duration_days: (end - start).num_days(),
                completion_pct: phase.completion_pct,
                status: phase.status,
                is_critical: phase.is_critical_path,
                color: display_color(phase.phase_type).to_string(),
                occupancy_status: phase.occupancy_status,
            });
        }

        // min/max over a non-empty task list
        let project_start = tasks.iter().map(|t| t.start).min().unwrap_or(today);
        let project_end = tasks.iter().map(|t| t.end).max().unwrap_or(today);

        let total_weight: i64 = tasks.iter().map(|t| t.duration_days).sum();
        let overall_completion_pct = if total_weight == 0 {
            0.0
        } else {
            let weighted: f64 = tasks
                .iter()
                .map(|t| t.completion_pct * t.duration_days as f64)
                .sum();
            weighted / total_weight as f64
        };

        let critical_path: Vec<i64> = tasks
            .iter()
            .filter(|t| t.is_critical)
            .map(|t| t.id)
            .collect();

        let mut warnings = Vec::new();
        for task in &tasks {
            if task.status == PhaseStatus::Delayed {
                warnings.push(format!("Phase '{}' is delayed", task.code));
            }
        }
        for phase in phases {
            if !phase.is_heritage() {
                continue;
            }
            let has_clearance = milestones.iter().any(|m| {
                m.phase_id == phase.id && m.milestone_type == MilestoneType::HeritageClearance
            });
            if !has_clearance {
                warnings.push(format!(
                    "Heritage phase '{}' missing heritage clearance milestone",
                    phase.code
                ));
            }
        }

        let milestones = milestones
            .iter()
            .map(|m| GanttMilestone {
                id: m.id,
                phase_id: m.phase_id,
                name: m.name.clone(),
                milestone_type: m.milestone_type,
                planned_date: m.planned_date,
                actual_date: m.actual_date,
                is_achieved: m.is_achieved(),
                is_overdue: m.is_overdue,
                requires_approval: m.requires_approval,
                approval_status: m.approval_status.clone(),
            })
            .collect();

        GanttChart {
            project_id,
            project_name: project_name.to_string(),
            tasks,
            milestones,
            project_start,
            project_end,
            total_duration_days: (project_end - project_start).num_days(),
            overall_completion_pct,
            critical_path,
            phases_summary,
            warnings,
        }
    }
}

/// Fixed display color per phase type. Unmapped types render neutral gray.
fn display_color(phase_type: PhaseType) -> &'static str {
    match phase_type {
        PhaseType::Demolition => "#B71C1C",
        PhaseType::SoftStrip => "#E53935",
        PhaseType::SitePreparation => "#8D6E63",
        PhaseType::Foundation => "#6D4C41",
        PhaseType::Structure => "#455A64",
        PhaseType::Envelope => "#546E7A",
        PhaseType::Facade => "#0288D1",
        PhaseType::MepRoughIn => "#F9A825",
        PhaseType::InteriorFitOut => "#7B1FA2",
        PhaseType::TenantFitOut => "#9C27B0",
        PhaseType::Refurbishment => "#5E35B1",
        PhaseType::HeritageAssessment => "#2E7D32",
        PhaseType::HeritageRestoration => "#388E3C",
        PhaseType::HeritageIntegration => "#43A047",
        PhaseType::TenantRelocation => "#00838F",
        PhaseType::Landscaping => "#689F38",
        PhaseType::Commissioning => "#00695C",
        PhaseType::Handover => "#1565C0",
        _ => "#9E9E9E",
    }
}
