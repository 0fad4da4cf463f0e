// src/simulation/engine.rs

use tracing::{info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::model::{ConstraintSet, Frequency, StoreLedger, TargetBook, Weekday};
use crate::simulation::config::GoalSeekConfig;
use crate::simulation::feasibility::{self, FeasibilityReport};
use crate::simulation::metrics::LedgerMetrics;
use crate::strategy::implementations::GreedyBalancer;
use crate::strategy::optimization::{goal_seek_with, GoalSeekOutcome};
use crate::strategy::traits::DayAssignment;

/// One operator's working state: a ledger, its constraints and the
/// planning-year targets.
///
/// Every session owns its own ledger copy; goal-seek trials never show
/// through until the best plan is published at the end of the run.
pub struct PlanningSession {
    ledger: StoreLedger,
    constraints: ConstraintSet,
    targets: TargetBook,
    assignment: Box<dyn DayAssignment>,
}

impl PlanningSession {
    pub fn new(ledger: StoreLedger, constraints: ConstraintSet, targets: TargetBook) -> Self {
        Self::with_assignment(ledger, constraints, targets, Box::new(GreedyBalancer))
    }

    pub fn with_assignment(
        ledger: StoreLedger,
        constraints: ConstraintSet,
        targets: TargetBook,
        assignment: Box<dyn DayAssignment>,
    ) -> Self {
        Self {
            ledger,
            constraints,
            targets,
            assignment,
        }
    }

    pub fn ledger(&self) -> &StoreLedger {
        &self.ledger
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn targets(&self) -> &TargetBook {
        &self.targets
    }

    /// Replaces the constraint set after range validation.
    pub fn set_constraints(&mut self, constraints: ConstraintSet) -> PlannerResult<()> {
        constraints.validate()?;
        self.constraints = constraints;
        Ok(())
    }

    /// Re-assigns delivery days for every store from its frequency.
    pub fn auto_distribute(&mut self) {
        self.assignment.assign(&mut self.ledger);
        info!(stores = self.ledger.len(), "Delivery days redistributed");
    }

    pub fn check(&self) -> FeasibilityReport {
        feasibility::check(&self.ledger, &self.constraints)
    }

    pub fn metrics(&self) -> LedgerMetrics {
        LedgerMetrics::calculate(&self.ledger, &self.constraints)
    }

    /// Sets a store's frequency from an operator-entered value, clipped to
    /// 2..=5. Day flags are left as they are until the next distribution.
    pub fn set_frequency(&mut self, store_code: &str, raw: i64) -> PlannerResult<Frequency> {
        let index = self.ledger.position(store_code)?;
        let frequency = Frequency::clamped(raw);
        if i64::from(frequency.get()) != raw {
            warn!(store = store_code, raw, clipped = frequency.get(), "Frequency clipped to 2..=5");
        }
        self.ledger.set_frequency(index, frequency)?;
        Ok(frequency)
    }

    /// Overwrites a store's delivery days by hand.
    pub fn set_days(&mut self, store_code: &str, days: &[Weekday]) -> PlannerResult<()> {
        let index = self.ledger.position(store_code)?;
        let store = &mut self.ledger.stores_mut()[index];
        store.day_flags.clear();
        for &day in days {
            store.day_flags[day] = true;
        }
        if !store.flags_match_frequency() {
            warn!(
                store = store_code,
                days = store.day_flags.served_count(),
                frequency = store.scenario_freq.get(),
                "Served days differ from scenario frequency"
            );
        }
        Ok(())
    }

    /// Runs goal-seek against the target mix of `year` and publishes the
    /// best ledger into the session, feasible or not. Callers inspect
    /// `GoalSeekOutcome::feasible` before saving.
    pub fn goal_seek(
        &mut self,
        year: &str,
        config: &GoalSeekConfig,
    ) -> PlannerResult<GoalSeekOutcome> {
        let target = *self.targets.for_year(year)?;
        if self.ledger.is_empty() {
            return Err(PlannerError::EmptyLedger);
        }
        let outcome = goal_seek_with(
            self.assignment.as_ref(),
            &self.ledger,
            &self.constraints,
            &target,
            config,
        )?;
        self.ledger = outcome.ledger.clone();
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SegmentCapacity, SegmentRules, StoreRecord, TargetMix};

    fn session() -> PlanningSession {
        let ledger = StoreLedger::new(vec![
            StoreRecord::new("A", Frequency::new(4).unwrap()).with_avg_rte(2.0),
            StoreRecord::new("B", Frequency::new(4).unwrap()).with_avg_rte(2.0),
        ]);
        let constraints = ConstraintSet {
            drop_points_limit: 100,
            local: SegmentCapacity::new(10, 100.0),
            mthatha: SegmentCapacity::new(2, 100.0),
            other_country: SegmentCapacity::new(10, 100.0),
            rules: SegmentRules::default(),
        };
        let mut targets = TargetBook::new();
        targets.insert("2026", TargetMix::new(0.0, 0.5, 0.5, 0.0));
        PlanningSession::new(ledger, constraints, targets)
    }

    #[test]
    fn test_goal_seek_publishes_best_ledger() {
        let mut session = session();
        let outcome = session.goal_seek("2026", &GoalSeekConfig::default()).unwrap();
        assert_eq!(session.ledger(), &outcome.ledger);
        assert_eq!(session.ledger().frequency(0).unwrap().get(), 3);
        assert!(outcome.penalty.abs() < 1e-12);
        assert!(session.check().is_feasible());
    }

    #[test]
    fn test_goal_seek_unknown_year() {
        let mut session = session();
        let before = session.ledger().clone();
        assert!(matches!(
            session.goal_seek("1999", &GoalSeekConfig::default()),
            Err(PlannerError::UnknownPlanningYear { .. })
        ));
        assert_eq!(session.ledger(), &before);
    }

    #[test]
    fn test_set_frequency_clips() {
        let mut session = session();
        assert_eq!(session.set_frequency("A", 9).unwrap().get(), 5);
        assert_eq!(session.set_frequency("B", 0).unwrap().get(), 2);
        assert!(matches!(
            session.set_frequency("Z", 3),
            Err(PlannerError::UnknownStore { .. })
        ));
    }

    #[test]
    fn test_set_days_then_distribute() {
        let mut session = session();
        session.set_days("A", &[Weekday::Fri]).unwrap();
        assert_eq!(session.ledger().stores()[0].day_flags.served_days(), vec![Weekday::Fri]);

        session.auto_distribute();
        assert!(session.ledger().iter().all(|s| s.flags_match_frequency()));
    }

    #[test]
    fn test_set_constraints_validates() {
        let mut session = session();
        let mut bad = session.constraints().clone();
        bad.drop_points_limit = 501;
        assert!(session.set_constraints(bad).is_err());
        assert_eq!(session.constraints().drop_points_limit, 100);
    }

    #[test]
    fn test_metrics_of_distributed_session() {
        let mut session = session();
        session.auto_distribute();
        let metrics = session.metrics();
        assert_eq!(metrics.drop_points.values().iter().sum::<u32>(), 8);
        // Neither store is Local or Mthatha.
        assert_eq!(metrics.fleet.other_country.values().iter().sum::<f64>(), 16.0);
        assert!(metrics.mix.is_some());
    }
}
