// src/io/synthetic.rs

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{PlannerError, PlannerResult};
use crate::model::{Frequency, StoreLedger, StoreRecord};

/// Shape of a randomly generated demo ledger.
#[derive(Debug, Clone)]
pub struct SyntheticParams {
    pub stores: usize,
    /// Mean route-equivalent load per served day.
    pub mean_rte: f64,
    /// Spread of the per-store load.
    pub std_dev_rte: f64,
    /// Probability that a store runs on the local fleet.
    pub local_share: f64,
    /// Probability that a non-local store sits on the Mthatha corridor.
    pub mthatha_share: f64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            stores: 60,
            mean_rte: 1.2,
            std_dev_rte: 0.4,
            local_share: 0.5,
            mthatha_share: 0.2,
        }
    }
}

/// Builds a demo ledger with normally distributed store loads.
///
/// Loads are drawn from a Normal distribution and clamped at zero (a store
/// cannot add negative load). Frequencies are uniform over 2..=5 and day
/// flags are left empty for the balancer to fill.
pub fn generate_ledger<R: Rng>(
    params: &SyntheticParams,
    rng: &mut R,
) -> PlannerResult<StoreLedger> {
    let normal = Normal::new(params.mean_rte, params.std_dev_rte).map_err(|e| {
        PlannerError::InvalidParameter {
            message: format!("AvgRTE distribution: {e}"),
        }
    })?;
    let shares = [
        ("local_share", params.local_share),
        ("mthatha_share", params.mthatha_share),
    ];
    for (name, share) in shares {
        if !(0.0..=1.0).contains(&share) {
            return Err(PlannerError::InvalidParameter {
                message: format!("{name} must be within 0..=1, got {share}"),
            });
        }
    }

    let mut stores = Vec::with_capacity(params.stores);
    for i in 0..params.stores {
        let avg_rte: f64 = normal.sample(rng).max(0.0);
        let frequency = Frequency::clamped(rng.gen_range(2..=5));

        let store = if rng.gen_bool(params.local_share) {
            StoreRecord::new(format!("DC{:04}", i + 1), frequency)
                .with_group("Local")
                .with_distance_class("LOCAL")
                .with_route(format!("L{:02}", i % 12 + 1))
        } else if rng.gen_bool(params.mthatha_share) {
            StoreRecord::new(format!("DC{:04}", i + 1), frequency)
                .with_group("Country")
                .with_distance_class("COUNTRY MTHATHA")
                .with_route("MTH01")
        } else {
            StoreRecord::new(format!("DC{:04}", i + 1), frequency)
                .with_group("Country")
                .with_distance_class("COUNTRY OTHER")
                .with_route(format!("C{:02}", i % 6 + 1))
        };
        stores.push(store.with_name(format!("Store {}", i + 1)).with_avg_rte(avg_rte));
    }
    Ok(StoreLedger::new(stores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::model::{FleetSegment, SegmentRules};

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let params = SyntheticParams::default();
        let a = generate_ledger(&params, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_ledger(&params, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 60);
    }

    #[test]
    fn test_generated_values_in_range() {
        let params = SyntheticParams {
            stores: 200,
            std_dev_rte: 2.0,
            ..SyntheticParams::default()
        };
        let ledger = generate_ledger(&params, &mut StdRng::seed_from_u64(11)).unwrap();
        assert!(ledger.iter().all(|s| s.avg_rte >= 0.0));
        assert!(ledger.iter().all(|s| s.day_flags.served_count() == 0));
    }

    #[test]
    fn test_all_local_share() {
        let params = SyntheticParams {
            stores: 20,
            local_share: 1.0,
            ..SyntheticParams::default()
        };
        let ledger = generate_ledger(&params, &mut StdRng::seed_from_u64(3)).unwrap();
        let rules = SegmentRules::default();
        assert!(ledger.iter().all(|s| rules.classify(s) == FleetSegment::Local));
    }

    #[test]
    fn test_bad_parameters() {
        let mut rng = StdRng::seed_from_u64(1);
        let negative_spread = SyntheticParams {
            std_dev_rte: -1.0,
            ..SyntheticParams::default()
        };
        assert!(generate_ledger(&negative_spread, &mut rng).is_err());

        let bad_share = SyntheticParams {
            local_share: 1.5,
            ..SyntheticParams::default()
        };
        assert!(generate_ledger(&bad_share, &mut rng).is_err());
    }
}
