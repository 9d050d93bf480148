//! Phase sequence validation.
//!
//! Checks dependency referential integrity and detects circular
//! dependencies before any scheduling math runs. Results are soft — a
//! flag plus an ordered message list — so callers decide whether to
//! proceed with an invalid graph.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

use std::collections::{HashMap, HashSet};

use crate::models::Phase;

/// Outcome of validating a phase sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceValidation {
    /// Whether the phase graph is usable as-is.
    pub is_valid: bool,
    /// Human-readable problems, in detection order.
    pub errors: Vec<String>,
}

/// Validates a phase sequence.
///
/// Checks, in order:
/// 1. Every declared dependency references an existing phase. One error
///    per bad reference; validation continues across phases.
/// 2. The predecessor graph is acyclic. The first cycle found appends a
///    single error and stops the search — cycles are not enumerated.
///
/// A phase listing itself as a predecessor is reported as a cycle.
pub fn validate_phases(phases: &[Phase]) -> SequenceValidation {
    let mut errors = Vec::new();

    let phase_ids: HashSet<i64> = phases.iter().map(|p| p.id).collect();

    for phase in phases {
        for dep in &phase.dependencies {
            if !phase_ids.contains(&dep.predecessor_id) {
                errors.push(format!(
                    "Phase '{}' depends on non-existent phase ID {}",
                    phase.code, dep.predecessor_id
                ));
            }
        }
    }

    // phase id → predecessor ids
    let mut predecessors: HashMap<i64, Vec<i64>> = HashMap::new();
    for phase in phases {
        let preds = predecessors.entry(phase.id).or_default();
        for dep in &phase.dependencies {
            preds.push(dep.predecessor_id);
        }
    }

    if has_cycle(phases, &predecessors) {
        errors.push("Circular dependency detected in phase sequence".to_string());
    }

    SequenceValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// DFS cycle detection over the predecessor graph.
///
/// Iterative with an explicit frame stack so pathologically deep phase
/// chains cannot overflow the call stack. A back edge into the active
/// path (`in_stack`) means a cycle.
fn has_cycle(phases: &[Phase], predecessors: &HashMap<i64, Vec<i64>>) -> bool {
    let mut visited: HashSet<i64> = HashSet::new();
    let mut in_stack: HashSet<i64> = HashSet::new();

    for phase in phases {
        if visited.contains(&phase.id) {
            continue;
        }
        // (node, index of next predecessor to examine)
        let mut stack: Vec<(i64, usize)> = vec![(phase.id, 0)];
        visited.insert(phase.id);
        in_stack.insert(phase.id);

        while let Some(frame) = stack.last_mut() {
            let (node, idx) = (frame.0, frame.1);
            let preds = predecessors.get(&node).map(Vec::as_slice).unwrap_or(&[]);
            if idx < preds.len() {
                frame.1 += 1;
                let next = preds[idx];
                if in_stack.contains(&next) {
                    return true;
                }
                if !visited.contains(&next) && predecessors.contains_key(&next) {
                    visited.insert(next);
                    in_stack.insert(next);
                    stack.push((next, 0));
                }
            } else {
                in_stack.remove(&node);
                stack.pop();
            }
        }
    }

    false
}
