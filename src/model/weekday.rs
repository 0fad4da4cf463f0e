// src/model/weekday.rs

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::PlannerError;

/// A delivery weekday. Labels match the column names of the store sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Mon,
    Tues,
    Wed,
    Thur,
    Fri,
}

impl Weekday {
    /// All delivery days in tie-break order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tues,
        Weekday::Wed,
        Weekday::Thur,
        Weekday::Fri,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tues => "Tues",
            Weekday::Wed => "Wed",
            Weekday::Thur => "Thur",
            Weekday::Fri => "Fri",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlannerError::InvalidParameter {
                message: format!(
                    "unknown weekday '{s}' (expected one of Mon, Tues, Wed, Thur, Fri)"
                ),
            })
    }
}

/// One value per delivery weekday.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekdayMap<T>([T; 5]);

impl<T> WeekdayMap<T> {
    pub fn from_array(values: [T; 5]) -> Self {
        Self(values)
    }

    /// Iterates `(day, value)` pairs Mon..Fri.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &T)> {
        Weekday::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> &[T; 5] {
        &self.0
    }
}

impl<T: Copy> WeekdayMap<T> {
    pub fn filled(value: T) -> Self {
        Self([value; 5])
    }
}

impl<T> Index<Weekday> for WeekdayMap<T> {
    type Output = T;

    fn index(&self, day: Weekday) -> &T {
        &self.0[day.index()]
    }
}

impl<T> IndexMut<Weekday> for WeekdayMap<T> {
    fn index_mut(&mut self, day: Weekday) -> &mut T {
        &mut self.0[day.index()]
    }
}

/// Delivery flags of one store.
pub type DayFlags = WeekdayMap<bool>;

impl DayFlags {
    pub fn served_count(&self) -> usize {
        self.0.iter().filter(|&&served| served).count()
    }

    pub fn served_days(&self) -> Vec<Weekday> {
        self.iter()
            .filter(|(_, &served)| served)
            .map(|(day, _)| day)
            .collect()
    }

    pub fn clear(&mut self) {
        self.0 = [false; 5];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parse_is_case_insensitive() {
        assert_eq!("tues".parse::<Weekday>().unwrap(), Weekday::Tues);
        assert_eq!(" THUR ".parse::<Weekday>().unwrap(), Weekday::Thur);
        assert!("Tuesday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_weekday_order_matches_index() {
        for (i, day) in Weekday::ALL.into_iter().enumerate() {
            assert_eq!(day.index(), i);
        }
        assert!(Weekday::Mon < Weekday::Fri);
    }

    #[test]
    fn test_day_flags_counting() {
        let mut flags = DayFlags::default();
        flags[Weekday::Mon] = true;
        flags[Weekday::Thur] = true;
        assert_eq!(flags.served_count(), 2);
        assert_eq!(flags.served_days(), vec![Weekday::Mon, Weekday::Thur]);

        flags.clear();
        assert_eq!(flags.served_count(), 0);
    }
}
