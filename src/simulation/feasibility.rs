// src/simulation/feasibility.rs

use std::fmt;

use crate::model::{ConstraintSet, FleetSegment, StoreLedger, Weekday, WeekdayMap};
use crate::simulation::metrics::{drop_points, fleet_rte, FleetRte};

/// Which daily limit a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    DropPoints,
    SegmentRte(FleetSegment),
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitKind::DropPoints => f.write_str("drop points"),
            LimitKind::SegmentRte(segment) => write!(f, "{segment} RTE"),
        }
    }
}

/// A single daily limit exceeded by a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub day: Weekday,
    pub limit: LimitKind,
    pub observed: f64,
    pub allowed: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {:.1} exceeds {:.1}",
            self.day, self.limit, self.observed, self.allowed
        )
    }
}

/// All violations found on a ledger; empty means feasible.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeasibilityReport {
    pub violations: Vec<Violation>,
}

impl FeasibilityReport {
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Every daily limit broken on `day`: drop points first, then each segment.
fn day_violations<'a>(
    day: Weekday,
    drops: &'a WeekdayMap<u32>,
    fleet: &'a FleetRte,
    constraints: &'a ConstraintSet,
) -> impl Iterator<Item = Violation> + 'a {
    let drop_limit = (
        LimitKind::DropPoints,
        f64::from(drops[day]),
        f64::from(constraints.drop_points_limit),
    );
    let segment_limits = FleetSegment::ALL.into_iter().map(move |segment| {
        (
            LimitKind::SegmentRte(segment),
            fleet.segment(segment)[day],
            constraints.capacity(segment).daily_capacity(),
        )
    });
    std::iter::once(drop_limit)
        .chain(segment_limits)
        .filter(|&(_, observed, allowed)| observed > allowed)
        .map(move |(limit, observed, allowed)| Violation {
            day,
            limit,
            observed,
            allowed,
        })
}

/// Lists every drop-point and segment-capacity breach, day by day.
pub fn check(ledger: &StoreLedger, constraints: &ConstraintSet) -> FeasibilityReport {
    let drops = drop_points(ledger);
    let fleet = fleet_rte(ledger, &constraints.rules);
    let violations = Weekday::ALL
        .into_iter()
        .flat_map(|day| day_violations(day, &drops, &fleet, constraints))
        .collect();
    FeasibilityReport { violations }
}

/// True when no weekday exceeds the drop-point limit or any segment's
/// truck capacity. Stops at the first breach.
pub fn feasible(ledger: &StoreLedger, constraints: &ConstraintSet) -> bool {
    let drops = drop_points(ledger);
    let fleet = fleet_rte(ledger, &constraints.rules);
    Weekday::ALL
        .into_iter()
        .all(|day| day_violations(day, &drops, &fleet, constraints).next().is_none())
}
