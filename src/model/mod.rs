// src/model/mod.rs

pub mod constraints;
pub mod ledger;
pub mod store;
pub mod targets;
pub mod weekday;

pub use constraints::{ConstraintSet, FleetSegment, SegmentCapacity, SegmentRules};
pub use ledger::StoreLedger;
pub use store::{Frequency, StoreRecord};
pub use targets::{TargetBook, TargetMix};
pub use weekday::{DayFlags, Weekday, WeekdayMap};
