// src/strategy/implementations.rs

use crate::model::{StoreLedger, Weekday, WeekdayMap};
use crate::strategy::traits::DayAssignment;

// =========================================================================
// Greedy count balancer
// =========================================================================

/// Online greedy balancer over raw drop counts.
///
/// Stores are taken in ledger order. Each one gets the `f` weekdays that
/// currently carry the fewest stores, ties going to the earlier weekday.
/// Earlier picks are never revisited, so the result depends on row order,
/// and RTE weight or fleet segment play no part in the choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBalancer;

impl GreedyBalancer {
    pub fn new() -> Self {
        Self
    }
}

impl DayAssignment for GreedyBalancer {
    fn assign(&self, ledger: &mut StoreLedger) {
        for store in ledger.stores_mut() {
            store.day_flags.clear();
        }

        let mut load = WeekdayMap::<u32>::default();
        for store in ledger.stores_mut() {
            let mut days = Weekday::ALL;
            // Stable sort keeps Mon..Fri order among equally loaded days.
            days.sort_by_key(|&day| load[day]);

            for &day in days.iter().take(store.scenario_freq.days()) {
                store.day_flags[day] = true;
                load[day] += 1;
            }
        }
    }
}

/// Re-derives every store's day flags with the greedy balancer.
pub fn auto_distribute(ledger: &mut StoreLedger) {
    GreedyBalancer.assign(ledger);
}
