// src/strategy/traits.rs

use std::fmt::Debug;

use crate::model::StoreLedger;

/// Turns each store's scenario frequency into concrete delivery days.
///
/// Implementations must be deterministic: the same frequencies in the same
/// row order always yield the same flags. The goal-seek relies on this to
/// search frequencies alone.
pub trait DayAssignment: Debug + Send + Sync {
    /// Rewrites every store's day flags in place.
    ///
    /// After the call each store is served on exactly `scenario_freq` days.
    fn assign(&self, ledger: &mut StoreLedger);
}
