// src/lib.rs

//! Delivery-day planning for a store network.
//!
//! Picks which weekdays each store is served, keeps every day within the
//! drop-point limit and the truck capacity of each fleet segment, and
//! steers the mix of weekly visit frequencies toward a planning-year
//! target.
//!
//! - `model`: stores, ledger, constraints, target mixes
//! - `simulation`: metrics, feasibility, the planning session
//! - `strategy`: day assignment and goal-seek
//! - `io`: CSV/JSON files, reports, synthetic demo data

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{PlannerError, PlannerResult};
pub use model::{ConstraintSet, Frequency, StoreLedger, StoreRecord, TargetMix};
pub use simulation::config::GoalSeekConfig;
pub use simulation::engine::PlanningSession;
pub use simulation::feasibility::feasible;
pub use simulation::metrics::{compute_mix, drop_points, fleet_rte};
pub use strategy::implementations::auto_distribute;
pub use strategy::optimization::{goal_seek, penalty, GoalSeekOutcome};
