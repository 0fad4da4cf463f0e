// src/simulation/metrics.rs

//! Frequency mix, daily drop points and daily fleet load of a ledger.
//!
//! Every function here is a pure read of a ledger snapshot.

use crate::error::{PlannerError, PlannerResult};
use crate::model::{
    ConstraintSet, FleetSegment, Frequency, SegmentRules, StoreLedger, TargetMix, WeekdayMap,
};

/// Share of stores at each weekly frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyMix {
    fractions: [f64; 4],
}

impl FrequencyMix {
    pub fn fraction(&self, frequency: Frequency) -> f64 {
        self.fractions[usize::from(frequency.get() - Frequency::MIN)]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Frequency, f64)> + '_ {
        Frequency::ALL.into_iter().zip(self.fractions.iter().copied())
    }

    /// Sum of squared gaps to `target` over the four frequencies.
    pub fn squared_deviation(&self, target: &TargetMix) -> f64 {
        self.iter()
            .map(|(frequency, share)| {
                let gap = share - target.fraction(frequency);
                gap * gap
            })
            .sum()
    }
}

/// Fraction of stores whose scenario frequency equals each of 2, 3, 4, 5.
///
/// # Errors
/// `EmptyLedger` when there are no stores to divide by.
pub fn compute_mix(ledger: &StoreLedger) -> PlannerResult<FrequencyMix> {
    if ledger.is_empty() {
        return Err(PlannerError::EmptyLedger);
    }
    let mut counts = [0usize; 4];
    for store in ledger {
        counts[usize::from(store.scenario_freq.get() - Frequency::MIN)] += 1;
    }
    let total = ledger.len() as f64;
    Ok(FrequencyMix {
        fractions: counts.map(|c| c as f64 / total),
    })
}

/// Number of stores served on each weekday.
pub fn drop_points(ledger: &StoreLedger) -> WeekdayMap<u32> {
    let mut totals = WeekdayMap::<u32>::default();
    for store in ledger {
        for (day, &served) in store.day_flags.iter() {
            if served {
                totals[day] += 1;
            }
        }
    }
    totals
}

/// Daily RTE per fleet segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetRte {
    pub local: WeekdayMap<f64>,
    pub mthatha: WeekdayMap<f64>,
    pub other_country: WeekdayMap<f64>,
}

impl FleetRte {
    pub fn segment(&self, segment: FleetSegment) -> &WeekdayMap<f64> {
        match segment {
            FleetSegment::Local => &self.local,
            FleetSegment::Mthatha => &self.mthatha,
            FleetSegment::OtherCountry => &self.other_country,
        }
    }

    fn segment_mut(&mut self, segment: FleetSegment) -> &mut WeekdayMap<f64> {
        match segment {
            FleetSegment::Local => &mut self.local,
            FleetSegment::Mthatha => &mut self.mthatha,
            FleetSegment::OtherCountry => &mut self.other_country,
        }
    }
}

/// Summed `avg_rte` of served stores per weekday, split by segment.
pub fn fleet_rte(ledger: &StoreLedger, rules: &SegmentRules) -> FleetRte {
    let mut fleet = FleetRte::default();
    for store in ledger {
        let load = fleet.segment_mut(rules.classify(store));
        for (day, &served) in store.day_flags.iter() {
            if served {
                load[day] += store.avg_rte;
            }
        }
    }
    fleet
}

/// Everything shown on the operator summary.
#[derive(Debug, Clone)]
pub struct LedgerMetrics {
    /// `None` for an empty ledger.
    pub mix: Option<FrequencyMix>,
    pub drop_points: WeekdayMap<u32>,
    pub fleet: FleetRte,
}

impl LedgerMetrics {
    pub fn calculate(ledger: &StoreLedger, constraints: &ConstraintSet) -> Self {
        Self {
            mix: compute_mix(ledger).ok(),
            drop_points: drop_points(ledger),
            fleet: fleet_rte(ledger, &constraints.rules),
        }
    }
}
