// src/model/ledger.rs

use crate::error::{PlannerError, PlannerResult};
use crate::model::store::{Frequency, StoreRecord};

/// The ordered collection of stores under planning.
///
/// Row order is significant: day assignment walks stores in this order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreLedger {
    stores: Vec<StoreRecord>,
}

impl StoreLedger {
    pub fn new(stores: Vec<StoreRecord>) -> Self {
        Self { stores }
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn stores(&self) -> &[StoreRecord] {
        &self.stores
    }

    pub fn stores_mut(&mut self) -> &mut [StoreRecord] {
        &mut self.stores
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StoreRecord> {
        self.stores.iter()
    }

    pub fn position(&self, store_code: &str) -> PlannerResult<usize> {
        self.stores
            .iter()
            .position(|s| s.store_code == store_code)
            .ok_or_else(|| PlannerError::UnknownStore {
                code: store_code.to_string(),
            })
    }

    pub fn frequencies(&self) -> Vec<Frequency> {
        self.stores.iter().map(|s| s.scenario_freq).collect()
    }

    pub fn frequency(&self, index: usize) -> PlannerResult<Frequency> {
        self.stores
            .get(index)
            .map(|s| s.scenario_freq)
            .ok_or(PlannerError::StoreIndexOutOfRange {
                index,
                len: self.stores.len(),
            })
    }

    /// Changes one store's frequency. Day flags are left stale until the
    /// next assignment pass.
    pub fn set_frequency(&mut self, index: usize, frequency: Frequency) -> PlannerResult<()> {
        let len = self.stores.len();
        let store = self
            .stores
            .get_mut(index)
            .ok_or(PlannerError::StoreIndexOutOfRange { index, len })?;
        store.scenario_freq = frequency;
        Ok(())
    }

    pub fn into_stores(self) -> Vec<StoreRecord> {
        self.stores
    }
}

impl FromIterator<StoreRecord> for StoreLedger {
    fn from_iter<I: IntoIterator<Item = StoreRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StoreLedger {
    type Item = &'a StoreRecord;
    type IntoIter = std::slice::Iter<'a, StoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.stores.iter()
    }
}
