// src/model/targets.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::model::store::Frequency;

/// Desired share of stores at each weekly frequency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetMix {
    pub two: f64,
    pub three: f64,
    pub four: f64,
    pub five: f64,
}

impl TargetMix {
    pub fn new(two: f64, three: f64, four: f64, five: f64) -> Self {
        Self {
            two,
            three,
            four,
            five,
        }
    }

    pub fn fraction(&self, frequency: Frequency) -> f64 {
        match frequency.get() {
            2 => self.two,
            3 => self.three,
            4 => self.four,
            _ => self.five,
        }
    }

    pub fn total(&self) -> f64 {
        self.two + self.three + self.four + self.five
    }
}

/// Target mixes keyed by planning-year label (e.g. "2026").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetBook(BTreeMap<String, TargetMix>);

impl TargetBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: impl Into<String>, mix: TargetMix) {
        self.0.insert(year.into(), mix);
    }

    pub fn for_year(&self, year: &str) -> PlannerResult<&TargetMix> {
        self.0
            .get(year)
            .ok_or_else(|| PlannerError::UnknownPlanningYear {
                year: year.to_string(),
            })
    }

    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_by_frequency() {
        let mix = TargetMix::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(mix.fraction(Frequency::new(2).unwrap()), 0.1);
        assert_eq!(mix.fraction(Frequency::new(5).unwrap()), 0.4);
        assert!((mix.total() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_target_book_lookup() {
        let book: TargetBook = serde_json::from_str(
            r#"{"2026": {"two": 0.25, "three": 0.5, "four": 0.25, "five": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(book.for_year("2026").unwrap().three, 0.5);
        assert!(matches!(
            book.for_year("2030"),
            Err(PlannerError::UnknownPlanningYear { .. })
        ));
        assert_eq!(book.years().collect::<Vec<_>>(), vec!["2026"]);
    }
}
