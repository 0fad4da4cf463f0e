// src/model/store.rs

use std::fmt;

use crate::error::{PlannerError, PlannerResult};
use crate::model::weekday::{DayFlags, Weekday};

/// Weekly visit frequency of a store, always within 2..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u8);

impl Frequency {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 5;

    /// Every valid frequency, ascending.
    pub const ALL: [Frequency; 4] = [Frequency(2), Frequency(3), Frequency(4), Frequency(5)];

    pub fn new(value: u8) -> PlannerResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PlannerError::InvalidFrequency {
                value: i64::from(value),
            })
        }
    }

    /// Clips an operator-entered value into range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Days per week as a count.
    pub fn days(self) -> usize {
        usize::from(self.0)
    }

    pub fn lower(self) -> Option<Self> {
        Self::new(self.0.checked_sub(1)?).ok()
    }

    pub fn higher(self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }

    /// `f-1` then `f+1`, skipping whichever falls outside 2..=5.
    pub fn neighbors(self) -> impl Iterator<Item = Frequency> {
        [self.lower(), self.higher()].into_iter().flatten()
    }
}

impl TryFrom<u8> for Frequency {
    type Error = PlannerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One delivery destination.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub store_code: String,
    pub store_name: String,
    /// Free-text distance class, e.g. "COUNTRY MTHATHA".
    pub distance_class: String,
    pub route: String,
    /// Fleet group; "Local" stores run on the local fleet.
    pub group: String,
    /// Route-equivalent load added on every day the store is served.
    pub avg_rte: f64,
    pub scenario_freq: Frequency,
    pub day_flags: DayFlags,
}

impl StoreRecord {
    pub fn new(store_code: impl Into<String>, scenario_freq: Frequency) -> Self {
        Self {
            store_code: store_code.into(),
            store_name: String::new(),
            distance_class: String::new(),
            route: String::new(),
            group: String::new(),
            avg_rte: 0.0,
            scenario_freq,
            day_flags: DayFlags::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = name.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_distance_class(mut self, distance_class: impl Into<String>) -> Self {
        self.distance_class = distance_class.into();
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    pub fn with_avg_rte(mut self, avg_rte: f64) -> Self {
        self.avg_rte = avg_rte;
        self
    }

    pub fn with_days(mut self, days: &[Weekday]) -> Self {
        for &day in days {
            self.day_flags[day] = true;
        }
        self
    }

    pub fn is_served(&self, day: Weekday) -> bool {
        self.day_flags[day]
    }

    /// True when the number of served days equals the scenario frequency.
    pub fn flags_match_frequency(&self) -> bool {
        self.day_flags.served_count() == self.scenario_freq.days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_bounds() {
        assert!(Frequency::new(1).is_err());
        assert!(Frequency::new(6).is_err());
        assert_eq!(Frequency::new(4).unwrap().get(), 4);
        assert!(matches!(
            Frequency::try_from(9u8),
            Err(PlannerError::InvalidFrequency { value: 9 })
        ));
    }

    #[test]
    fn test_frequency_clamped() {
        assert_eq!(Frequency::clamped(-3).get(), 2);
        assert_eq!(Frequency::clamped(3).get(), 3);
        assert_eq!(Frequency::clamped(12).get(), 5);
    }

    #[test]
    fn test_frequency_neighbors_skip_out_of_range() {
        let two: Vec<u8> = Frequency::new(2).unwrap().neighbors().map(Frequency::get).collect();
        assert_eq!(two, vec![3]);

        let four: Vec<u8> = Frequency::new(4).unwrap().neighbors().map(Frequency::get).collect();
        assert_eq!(four, vec![3, 5]);

        let five: Vec<u8> = Frequency::new(5).unwrap().neighbors().map(Frequency::get).collect();
        assert_eq!(five, vec![4]);
    }

    #[test]
    fn test_store_flags_match_frequency() {
        let store = StoreRecord::new("S1", Frequency::new(2).unwrap())
            .with_days(&[Weekday::Mon, Weekday::Wed]);
        assert!(store.flags_match_frequency());
        assert!(store.is_served(Weekday::Wed));
        assert!(!store.is_served(Weekday::Tues));
    }
}
