// src/io/ledger.rs

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::model::{DayFlags, Frequency, StoreLedger, StoreRecord, Weekday};

/// One row of the store sheet as it sits on disk.
///
/// Numbers are read loosely (integers or decimals, blanks allowed) and
/// normalised when converted into a `StoreRecord`.
#[derive(Debug, Deserialize)]
struct StoreRow {
    #[serde(rename = "StoreCode")]
    store_code: String,
    #[serde(rename = "StoreName", default)]
    store_name: String,
    #[serde(rename = "Distance", default)]
    distance: String,
    #[serde(rename = "Route", default)]
    route: String,
    #[serde(rename = "Group", default)]
    group: String,
    #[serde(rename = "AvgRTE", default)]
    avg_rte: Option<f64>,
    #[serde(rename = "ScenarioFreq", default)]
    scenario_freq: Option<f64>,
    #[serde(rename = "Mon", default)]
    mon: Option<f64>,
    #[serde(rename = "Tues", default)]
    tues: Option<f64>,
    #[serde(rename = "Wed", default)]
    wed: Option<f64>,
    #[serde(rename = "Thur", default)]
    thur: Option<f64>,
    #[serde(rename = "Fri", default)]
    fri: Option<f64>,
}

impl StoreRow {
    fn into_record(self, row: usize) -> PlannerResult<StoreRecord> {
        let avg_rte = self.avg_rte.unwrap_or(0.0);
        if !avg_rte.is_finite() || avg_rte < 0.0 {
            return Err(PlannerError::InvalidRecord {
                row,
                reason: format!("AvgRTE must be a non-negative number, got {avg_rte}"),
            });
        }

        let raw_freq = self
            .scenario_freq
            .filter(|f| f.is_finite())
            .ok_or_else(|| PlannerError::InvalidRecord {
                row,
                reason: "ScenarioFreq is missing".to_string(),
            })?
            .round() as i64;
        let scenario_freq = Frequency::clamped(raw_freq);
        if i64::from(scenario_freq.get()) != raw_freq {
            warn!(row, store = %self.store_code, raw_freq, "ScenarioFreq clipped to 2..=5");
        }

        let flag = |value: Option<f64>| value.is_some_and(|v| v != 0.0);
        let day_flags = DayFlags::from_array([
            flag(self.mon),
            flag(self.tues),
            flag(self.wed),
            flag(self.thur),
            flag(self.fri),
        ]);

        Ok(StoreRecord {
            store_code: self.store_code,
            store_name: self.store_name,
            distance_class: self.distance,
            route: self.route,
            group: self.group,
            avg_rte,
            scenario_freq,
            day_flags,
        })
    }
}

/// Output row: same columns, integer frequency and 0/1 flags.
#[derive(Debug, Serialize)]
struct StoreExportRow<'a> {
    #[serde(rename = "StoreCode")]
    store_code: &'a str,
    #[serde(rename = "StoreName")]
    store_name: &'a str,
    #[serde(rename = "Distance")]
    distance: &'a str,
    #[serde(rename = "Route")]
    route: &'a str,
    #[serde(rename = "Group")]
    group: &'a str,
    #[serde(rename = "AvgRTE")]
    avg_rte: f64,
    #[serde(rename = "ScenarioFreq")]
    scenario_freq: u8,
    #[serde(rename = "Mon")]
    mon: u8,
    #[serde(rename = "Tues")]
    tues: u8,
    #[serde(rename = "Wed")]
    wed: u8,
    #[serde(rename = "Thur")]
    thur: u8,
    #[serde(rename = "Fri")]
    fri: u8,
}

impl<'a> From<&'a StoreRecord> for StoreExportRow<'a> {
    fn from(store: &'a StoreRecord) -> Self {
        let flag = |day: Weekday| u8::from(store.is_served(day));
        Self {
            store_code: &store.store_code,
            store_name: &store.store_name,
            distance: &store.distance_class,
            route: &store.route,
            group: &store.group,
            avg_rte: store.avg_rte,
            scenario_freq: store.scenario_freq.get(),
            mon: flag(Weekday::Mon),
            tues: flag(Weekday::Tues),
            wed: flag(Weekday::Wed),
            thur: flag(Weekday::Thur),
            fri: flag(Weekday::Fri),
        }
    }
}

/// Reads a store sheet. Rows are numbered from 1, after the header.
pub fn read_ledger_from<R: Read>(reader: R) -> PlannerResult<StoreLedger> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut stores = Vec::new();
    for (i, row) in rdr.deserialize::<StoreRow>().enumerate() {
        stores.push(row?.into_record(i + 1)?);
    }
    Ok(StoreLedger::new(stores))
}

pub fn read_ledger(path: impl AsRef<Path>) -> PlannerResult<StoreLedger> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let ledger = read_ledger_from(file)?;
    info!(path = %path.display(), stores = ledger.len(), "Loaded store ledger");
    Ok(ledger)
}

pub fn write_ledger_to<W: Write>(writer: W, ledger: &StoreLedger) -> PlannerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for store in ledger {
        wtr.serialize(StoreExportRow::from(store))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the ledger in the same layout it is read from.
pub fn write_ledger(path: impl AsRef<Path>, ledger: &StoreLedger) -> PlannerResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_ledger_to(file, ledger)?;
    info!(path = %path.display(), stores = ledger.len(), "Saved store ledger");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
StoreCode,StoreName,Distance,Route,Group,AvgRTE,ScenarioFreq,Mon,Tues,Wed,Thur,Fri,Region
S1,Alpha,LOCAL,R1,Local,1.5,3,1,0,1,0,1,North
S2,Beta,COUNTRY MTHATHA,R9,Country,2.25,7.0,1.0,1.0,0.0,0.0,0.0,East
S3,Gamma,,,Country,,1,,,,,,South
";

    #[test]
    fn test_read_normalises_rows() {
        let ledger = read_ledger_from(SHEET.as_bytes()).unwrap();
        assert_eq!(ledger.len(), 3);

        let s1 = &ledger.stores()[0];
        assert_eq!(s1.group, "Local");
        assert_eq!(s1.scenario_freq.get(), 3);
        assert_eq!(
            s1.day_flags.served_days(),
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );

        let s2 = &ledger.stores()[1];
        assert_eq!(s2.distance_class, "COUNTRY MTHATHA");
        assert_eq!(s2.scenario_freq.get(), 5);
        assert!((s2.avg_rte - 2.25).abs() < 1e-12);
        assert_eq!(s2.day_flags.served_count(), 2);

        let s3 = &ledger.stores()[2];
        assert_eq!(s3.scenario_freq.get(), 2);
        assert_eq!(s3.avg_rte, 0.0);
        assert_eq!(s3.day_flags.served_count(), 0);
    }

    #[test]
    fn test_negative_rte_rejected() {
        let sheet = "StoreCode,AvgRTE,ScenarioFreq\nS1,-1,3\n";
        assert!(matches!(
            read_ledger_from(sheet.as_bytes()),
            Err(PlannerError::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn test_missing_frequency_rejected() {
        let sheet = "StoreCode,AvgRTE,ScenarioFreq\nS1,1.0,\n";
        assert!(matches!(
            read_ledger_from(sheet.as_bytes()),
            Err(PlannerError::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn test_written_sheet_uses_integer_flags() {
        let ledger = read_ledger_from(SHEET.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_ledger_to(&mut out, &ledger).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "StoreCode,StoreName,Distance,Route,Group,AvgRTE,ScenarioFreq,Mon,Tues,Wed,Thur,Fri"
        );
        assert_eq!(lines.next().unwrap(), "S1,Alpha,LOCAL,R1,Local,1.5,3,1,0,1,0,1");
        assert_eq!(read_ledger_from(text.as_bytes()).unwrap(), ledger);
    }
}
