// src/model/constraints.rs

use std::fmt;

use crate::error::{PlannerError, PlannerResult};
use crate::model::store::StoreRecord;

/// The three fleet groupings, each with its own daily capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FleetSegment {
    Local,
    Mthatha,
    OtherCountry,
}

impl FleetSegment {
    pub const ALL: [FleetSegment; 3] = [
        FleetSegment::Local,
        FleetSegment::Mthatha,
        FleetSegment::OtherCountry,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FleetSegment::Local => "Local",
            FleetSegment::Mthatha => "Mthatha",
            FleetSegment::OtherCountry => "Other Country",
        }
    }
}

impl fmt::Display for FleetSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trucks available to a segment and the RTE each truck carries per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentCapacity {
    pub trucks: u32,
    pub rte_per_truck: f64,
}

impl SegmentCapacity {
    pub fn new(trucks: u32, rte_per_truck: f64) -> Self {
        Self {
            trucks,
            rte_per_truck,
        }
    }

    pub fn daily_capacity(&self) -> f64 {
        f64::from(self.trucks) * self.rte_per_truck
    }
}

/// Rules that place each store in exactly one fleet segment.
///
/// Local wins over Mthatha; a store matching neither is Other Country.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRules {
    /// Exact `group` value of local-fleet stores.
    pub local_group: String,
    /// Case-insensitive substrings of `distance_class` that mark the
    /// Mthatha corridor.
    pub mthatha_patterns: Vec<String>,
}

impl Default for SegmentRules {
    fn default() -> Self {
        Self {
            local_group: "Local".to_string(),
            mthatha_patterns: vec!["COUNTRY MTHATHA".to_string()],
        }
    }
}

impl SegmentRules {
    pub fn classify(&self, store: &StoreRecord) -> FleetSegment {
        if store.group == self.local_group {
            return FleetSegment::Local;
        }
        let distance = store.distance_class.to_lowercase();
        if self
            .mthatha_patterns
            .iter()
            .any(|pattern| distance.contains(&pattern.to_lowercase()))
        {
            FleetSegment::Mthatha
        } else {
            FleetSegment::OtherCountry
        }
    }
}

/// Operator-controlled limits checked on every weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSet {
    /// Maximum stores served network-wide on one day.
    pub drop_points_limit: u32,
    pub local: SegmentCapacity,
    pub mthatha: SegmentCapacity,
    pub other_country: SegmentCapacity,
    pub rules: SegmentRules,
}

impl ConstraintSet {
    pub fn capacity(&self, segment: FleetSegment) -> &SegmentCapacity {
        match segment {
            FleetSegment::Local => &self.local,
            FleetSegment::Mthatha => &self.mthatha,
            FleetSegment::OtherCountry => &self.other_country,
        }
    }

    pub fn capacity_mut(&mut self, segment: FleetSegment) -> &mut SegmentCapacity {
        match segment {
            FleetSegment::Local => &mut self.local,
            FleetSegment::Mthatha => &mut self.mthatha,
            FleetSegment::OtherCountry => &mut self.other_country,
        }
    }

    /// Checks the ranges accepted from the operator.
    ///
    /// The planning algorithms never call this; it guards edits and loads.
    pub fn validate(&self) -> PlannerResult<()> {
        check_range("DropPointsLimit", f64::from(self.drop_points_limit), 1.0, 500.0)?;
        check_range("Local_Trucks", f64::from(self.local.trucks), 0.0, 50.0)?;
        check_range("Local_8ton_RTE_Capacity", self.local.rte_per_truck, 1.0, 200.0)?;
        check_range("Pantec_Trucks_Mthatha", f64::from(self.mthatha.trucks), 0.0, 10.0)?;
        check_range("Pantec_RTE_Capacity", self.mthatha.rte_per_truck, 1.0, 200.0)?;
        check_range("Country_12ton_Trucks", f64::from(self.other_country.trucks), 0.0, 20.0)?;
        check_range("Country_12ton_RTE_Capacity", self.other_country.rte_per_truck, 1.0, 300.0)?;

        if self.rules.mthatha_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(PlannerError::InvalidParameter {
                message: "Mthatha distance patterns must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> PlannerResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PlannerError::ConstraintOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::Frequency;

    fn store(group: &str, distance: &str) -> StoreRecord {
        StoreRecord::new("S", Frequency::new(2).unwrap())
            .with_group(group)
            .with_distance_class(distance)
    }

    fn constraints() -> ConstraintSet {
        ConstraintSet {
            drop_points_limit: 120,
            local: SegmentCapacity::new(10, 40.0),
            mthatha: SegmentCapacity::new(2, 30.0),
            other_country: SegmentCapacity::new(5, 60.0),
            rules: SegmentRules::default(),
        }
    }

    #[test]
    fn test_classify_local_takes_precedence() {
        let rules = SegmentRules::default();
        assert_eq!(rules.classify(&store("Local", "COUNTRY MTHATHA")), FleetSegment::Local);
        assert_eq!(rules.classify(&store("Country", "Country Mthatha 2")), FleetSegment::Mthatha);
        assert_eq!(rules.classify(&store("Country", "COUNTRY EAST")), FleetSegment::OtherCountry);
    }

    #[test]
    fn test_classify_group_match_is_exact() {
        let rules = SegmentRules::default();
        assert_eq!(rules.classify(&store("local", "")), FleetSegment::OtherCountry);
    }

    #[test]
    fn test_classify_extra_patterns() {
        let rules = SegmentRules {
            mthatha_patterns: vec!["COUNTRY MTHATHA".into(), "kokstad".into()],
            ..SegmentRules::default()
        };
        assert_eq!(rules.classify(&store("Country", "Far KOKSTAD run")), FleetSegment::Mthatha);
    }

    #[test]
    fn test_daily_capacity() {
        assert!((SegmentCapacity::new(3, 12.5).daily_capacity() - 37.5).abs() < 1e-10);
        assert_eq!(SegmentCapacity::new(0, 50.0).daily_capacity(), 0.0);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(constraints().validate().is_ok());

        let mut c = constraints();
        c.drop_points_limit = 0;
        assert!(matches!(
            c.validate(),
            Err(PlannerError::ConstraintOutOfRange { field: "DropPointsLimit", .. })
        ));

        let mut c = constraints();
        c.mthatha.trucks = 11;
        assert!(c.validate().is_err());

        let mut c = constraints();
        c.rules.mthatha_patterns.push("  ".into());
        assert!(matches!(c.validate(), Err(PlannerError::InvalidParameter { .. })));
    }
}
