// src/strategy/optimization.rs

//! Goal-seek over per-store visit frequencies.
//!
//! The search is coordinate-wise hill climbing: every store in turn tries
//! one step down and one step up in frequency, the whole ledger is
//! re-assigned, and the move is kept only if the plan stays feasible and
//! the mix penalty drops. Days follow deterministically from frequencies,
//! so only the frequency vector is searched. It stops at the first local
//! minimum; there is no restart.

use tracing::{debug, info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::model::{ConstraintSet, StoreLedger, TargetMix};
use crate::simulation::config::GoalSeekConfig;
use crate::simulation::feasibility::feasible;
use crate::simulation::metrics::compute_mix;
use crate::strategy::implementations::GreedyBalancer;
use crate::strategy::traits::DayAssignment;

/// Sum of squared differences between the ledger's frequency mix and the
/// target, over frequencies 2..=5.
///
/// Zero means the mix matches exactly.
pub fn penalty(ledger: &StoreLedger, target: &TargetMix) -> PlannerResult<f64> {
    Ok(compute_mix(ledger)?.squared_deviation(target))
}

/// Result of one goal-seek run.
#[derive(Debug, Clone)]
pub struct GoalSeekOutcome {
    /// Best ledger found, with day flags matching its frequencies.
    pub ledger: StoreLedger,
    pub penalty: f64,
    /// Whether `ledger` passes the feasibility check. A run that starts
    /// infeasible and never finds a feasible improvement ends here `false`.
    pub feasible: bool,
    pub passes: usize,
    pub trials: usize,
    pub accepted_moves: usize,
    /// Penalty of the baseline followed by every accepted state.
    pub penalty_trace: Vec<f64>,
}

/// Goal-seek with the greedy day balancer.
pub fn goal_seek(
    ledger: &StoreLedger,
    constraints: &ConstraintSet,
    target: &TargetMix,
    config: &GoalSeekConfig,
) -> PlannerResult<GoalSeekOutcome> {
    goal_seek_with(&GreedyBalancer, ledger, constraints, target, config)
}

/// Goal-seek using any deterministic day assignment.
///
/// The caller's ledger is never touched; the search runs on a private
/// working copy and returns the best copy it accepted. An accepted move
/// stays in the working ledger. A rejected trial resets the store to the
/// frequency it had when the pass reached it and re-assigns days, even
/// when the other neighbour was just accepted, so the working ledger can
/// fall behind the best one.
///
/// # Errors
/// `EmptyLedger` when there are no stores.
pub fn goal_seek_with<A: DayAssignment + ?Sized>(
    assignment: &A,
    ledger: &StoreLedger,
    constraints: &ConstraintSet,
    target: &TargetMix,
    config: &GoalSeekConfig,
) -> PlannerResult<GoalSeekOutcome> {
    if ledger.is_empty() {
        return Err(PlannerError::EmptyLedger);
    }

    let mut working = ledger.clone();
    assignment.assign(&mut working);
    let mut best = working.clone();
    let mut best_penalty = penalty(&best, target)?;
    let mut penalty_trace = vec![best_penalty];

    let mut passes = 0;
    let mut trials = 0;
    let mut accepted_moves = 0;

    for pass in 0..config.max_iterations {
        passes += 1;
        let mut improved = false;
        let mut rejected_infeasible = 0usize;

        for index in 0..working.len() {
            let start = working.frequency(index)?;
            for candidate in start.neighbors() {
                let previous = working.frequency(index)?;
                working.set_frequency(index, candidate)?;
                assignment.assign(&mut working);
                trials += 1;

                let improvement = if feasible(&working, constraints) {
                    let trial_penalty = penalty(&working, target)?;
                    (trial_penalty + config.epsilon < best_penalty).then_some(trial_penalty)
                } else {
                    rejected_infeasible += 1;
                    None
                };

                if let Some(trial_penalty) = improvement {
                    best_penalty = trial_penalty;
                    debug!(
                        pass,
                        store = %working.stores()[index].store_code,
                        from = %previous,
                        to = %candidate,
                        penalty = best_penalty,
                        "Accepted frequency move"
                    );
                    best = working.clone();
                    penalty_trace.push(best_penalty);
                    accepted_moves += 1;
                    improved = true;
                } else {
                    working.set_frequency(index, start)?;
                    assignment.assign(&mut working);
                }
            }
        }

        debug!(
            pass,
            improved,
            rejected_infeasible,
            penalty = best_penalty,
            "Goal-seek pass finished"
        );
        if !improved {
            break;
        }
    }

    let is_feasible = feasible(&best, constraints);
    if is_feasible {
        info!(passes, trials, accepted_moves, penalty = best_penalty, "Goal-seek finished");
    } else {
        warn!(passes, trials, penalty = best_penalty, "Goal-seek finished on an infeasible plan");
    }

    Ok(GoalSeekOutcome {
        ledger: best,
        penalty: best_penalty,
        feasible: is_feasible,
        passes,
        trials,
        accepted_moves,
        penalty_trace,
    })
}
