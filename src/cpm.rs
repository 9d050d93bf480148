//! Critical Path Method (CPM) analysis.
//!
//! Two-pass CPM over the phase dependency graph: a forward pass computes
//! earliest start/finish dates, a backward pass computes latest
//! start/finish dates, and the difference gives each phase's total float.
//! Zero-float phases form the critical path.
//!
//! Callers are expected to run [`crate::validation::validate_phases`]
//! first; the passes here skip unresolved predecessors defensively
//! rather than panic, so a skipped validation degrades output instead of
//! crashing.
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{DependencyType, Phase};

/// Result of a critical path analysis.
///
/// All maps are keyed by phase ID and cover every input phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriticalPathResult {
    /// Zero-float phase IDs, in topological order.
    pub critical_path: Vec<i64>,
    /// Project span in days, from the project start to the latest
    /// earliest finish.
    pub total_duration_days: i64,
    /// Earliest date each phase can start.
    pub earliest_start: HashMap<i64, NaiveDate>,
    /// Earliest date each phase can finish.
    pub earliest_finish: HashMap<i64, NaiveDate>,
    /// Latest date each phase can start without delaying the project.
    pub latest_start: HashMap<i64, NaiveDate>,
    /// Latest date each phase can finish without delaying the project.
    pub latest_finish: HashMap<i64, NaiveDate>,
    /// Total float (slack) per phase, in days.
    pub float_days: HashMap<i64, i64>,
}

/// Stateless critical path analyzer.
///
/// Construct one wherever needed; it carries no state between calls and
/// is safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalPathAnalyzer;

impl CriticalPathAnalyzer {
    /// Creates a new analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Runs a full CPM analysis.
    ///
    /// Durations resolve via [`Phase::scheduling_duration_days`] (30-day
    /// fallback). Earliest starts are floored at `project_start`.
    /// Dependencies on unknown phase IDs are ignored.
    pub fn analyze(&self, phases: &[Phase], project_start: NaiveDate) -> CriticalPathResult {
        if phases.is_empty() {
            return CriticalPathResult::default();
        }

        let phase_ids: HashSet<i64> = phases.iter().map(|p| p.id).collect();

        // phase id → [(pred id, dep type, lag)], and the reverse edges
        let mut predecessors: HashMap<i64, Vec<(i64, DependencyType, i64)>> = HashMap::new();
        let mut successors: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut durations: HashMap<i64, i64> = HashMap::new();

        for phase in phases {
            durations.insert(phase.id, phase.scheduling_duration_days());
            let preds = predecessors.entry(phase.id).or_default();
            for dep in &phase.dependencies {
                preds.push((dep.predecessor_id, dep.dependency_type, dep.lag_days));
                successors.entry(dep.predecessor_id).or_default().push(phase.id);
            }
        }

        let order = topological_order(phases, &predecessors, &phase_ids);

        // Forward pass: earliest start/finish.
        let mut earliest_start: HashMap<i64, NaiveDate> = HashMap::new();
        let mut earliest_finish: HashMap<i64, NaiveDate> = HashMap::new();

        for &id in &order {
            let preds = predecessors.get(&id).map(Vec::as_slice).unwrap_or(&[]);
            let mut start = project_start;
            for &(pred_id, dep_type, lag) in preds {
                // Unresolved predecessor: skip rather than dereference.
                let Some(&pred_finish) = earliest_finish.get(&pred_id) else {
                    continue;
                };
                let candidate = match dep_type {
                    DependencyType::FinishToStart | DependencyType::FinishToFinish => {
                        pred_finish + Duration::days(lag)
                    }
                    DependencyType::StartToStart => earliest_start[&pred_id] + Duration::days(lag),
                };
                start = start.max(candidate);
            }
            let finish = start + Duration::days(durations[&id]);
            earliest_start.insert(id, start);
            earliest_finish.insert(id, finish);
        }

        let project_end = earliest_finish
            .values()
            .max()
            .copied()
            .unwrap_or(project_start);

        // Backward pass: latest finish/start, in reverse topological
        // order. A phase with no resolved successor yet falls back to
        // the project end; this fallback is order-sensitive for
        // non-tree graphs and deliberately preserved.
        let mut latest_start: HashMap<i64, NaiveDate> = HashMap::new();
        let mut latest_finish: HashMap<i64, NaiveDate> = HashMap::new();

        for &id in order.iter().rev() {
            let succs = successors.get(&id).map(Vec::as_slice).unwrap_or(&[]);
            let finish = if succs.is_empty() {
                project_end
            } else {
                succs
                    .iter()
                    .filter_map(|s| latest_start.get(s))
                    .min()
                    .copied()
                    .unwrap_or(project_end)
            };
            latest_finish.insert(id, finish);
            latest_start.insert(id, finish - Duration::days(durations[&id]));
        }

        let mut float_days: HashMap<i64, i64> = HashMap::new();
        for &id in &order {
            float_days.insert(id, (latest_start[&id] - earliest_start[&id]).num_days());
        }

        let critical_path: Vec<i64> = order
            .iter()
            .copied()
            .filter(|id| float_days[id] == 0)
            .collect();

        CriticalPathResult {
            critical_path,
            total_duration_days: (project_end - project_start).num_days(),
            earliest_start,
            earliest_finish,
            latest_start,
            latest_finish,
            float_days,
        }
    }
}

/// Predecessors-first topological ordering.
///
/// Visits each phase in input order, recursing into predecessors before
/// emitting the phase itself; ties among ready phases break by input
/// order. Implemented with an explicit frame stack so graph depth is not
/// bounded by the call stack, preserving the traversal order of the
/// recursive formulation.
fn topological_order(
    phases: &[Phase],
    predecessors: &HashMap<i64, Vec<(i64, DependencyType, i64)>>,
    phase_ids: &HashSet<i64>,
) -> Vec<i64> {
    let mut order = Vec::with_capacity(phases.len());
    let mut processed: HashSet<i64> = HashSet::new();

    for phase in phases {
        if processed.contains(&phase.id) {
            continue;
        }
        // (node, index of next predecessor to examine)
        let mut stack: Vec<(i64, usize)> = vec![(phase.id, 0)];
        processed.insert(phase.id);

        while let Some(frame) = stack.last_mut() {
            let (node, idx) = (frame.0, frame.1);
            let preds = predecessors.get(&node).map(Vec::as_slice).unwrap_or(&[]);
            if idx < preds.len() {
                frame.1 += 1;
                let pred = preds[idx].0;
                if phase_ids.contains(&pred) && !processed.contains(&pred) {
                    processed.insert(pred);
                    stack.push((pred, 0));
                }
            } else {
                order.push(node);
                stack.pop();
            }
        }
    }

    order
}
