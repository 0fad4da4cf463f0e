// src/io/settings.rs

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PlannerResult;
use crate::model::{ConstraintSet, SegmentCapacity, SegmentRules, TargetBook};

/// Flat key layout of `constraints.json`.
#[derive(Debug, Serialize, Deserialize)]
struct ConstraintFile {
    #[serde(rename = "DropPointsLimit")]
    drop_points_limit: u32,
    #[serde(rename = "Local_Trucks")]
    local_trucks: u32,
    #[serde(rename = "Local_8ton_RTE_Capacity")]
    local_rte_capacity: f64,
    #[serde(rename = "Pantec_Trucks_Mthatha")]
    mthatha_trucks: u32,
    #[serde(rename = "Pantec_RTE_Capacity")]
    mthatha_rte_capacity: f64,
    #[serde(rename = "Country_12ton_Trucks")]
    country_trucks: u32,
    #[serde(rename = "Country_12ton_RTE_Capacity")]
    country_rte_capacity: f64,
    #[serde(rename = "Local_Group", default = "default_local_group")]
    local_group: String,
    #[serde(rename = "Mthatha_Patterns", default = "default_mthatha_patterns")]
    mthatha_patterns: Vec<String>,
}

fn default_local_group() -> String {
    SegmentRules::default().local_group
}

fn default_mthatha_patterns() -> Vec<String> {
    SegmentRules::default().mthatha_patterns
}

impl From<ConstraintFile> for ConstraintSet {
    fn from(file: ConstraintFile) -> Self {
        Self {
            drop_points_limit: file.drop_points_limit,
            local: SegmentCapacity::new(file.local_trucks, file.local_rte_capacity),
            mthatha: SegmentCapacity::new(file.mthatha_trucks, file.mthatha_rte_capacity),
            other_country: SegmentCapacity::new(file.country_trucks, file.country_rte_capacity),
            rules: SegmentRules {
                local_group: file.local_group,
                mthatha_patterns: file.mthatha_patterns,
            },
        }
    }
}

impl From<&ConstraintSet> for ConstraintFile {
    fn from(c: &ConstraintSet) -> Self {
        Self {
            drop_points_limit: c.drop_points_limit,
            local_trucks: c.local.trucks,
            local_rte_capacity: c.local.rte_per_truck,
            mthatha_trucks: c.mthatha.trucks,
            mthatha_rte_capacity: c.mthatha.rte_per_truck,
            country_trucks: c.other_country.trucks,
            country_rte_capacity: c.other_country.rte_per_truck,
            local_group: c.rules.local_group.clone(),
            mthatha_patterns: c.rules.mthatha_patterns.clone(),
        }
    }
}

pub fn read_constraints_from<R: Read>(reader: R) -> PlannerResult<ConstraintSet> {
    let file: ConstraintFile = serde_json::from_reader(reader)?;
    Ok(file.into())
}

/// Loads `constraints.json`. Ranges are not checked here; the operator
/// boundary calls `ConstraintSet::validate`.
pub fn read_constraints(path: impl AsRef<Path>) -> PlannerResult<ConstraintSet> {
    let path = path.as_ref();
    let constraints = read_constraints_from(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), "Loaded constraints");
    Ok(constraints)
}

pub fn write_constraints_to<W: Write>(writer: W, constraints: &ConstraintSet) -> PlannerResult<()> {
    serde_json::to_writer_pretty(writer, &ConstraintFile::from(constraints))?;
    Ok(())
}

pub fn write_constraints(path: impl AsRef<Path>, constraints: &ConstraintSet) -> PlannerResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_constraints_to(&mut writer, constraints)?;
    writer.flush()?;
    info!(path = %path.display(), "Saved constraints");
    Ok(())
}

pub fn read_targets_from<R: Read>(reader: R) -> PlannerResult<TargetBook> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_targets(path: impl AsRef<Path>) -> PlannerResult<TargetBook> {
    let path = path.as_ref();
    let targets = read_targets_from(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), years = targets.years().count(), "Loaded target mixes");
    Ok(targets)
}
