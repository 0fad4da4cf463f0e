// src/io/reporting.rs

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::PlannerResult;
use crate::model::{FleetSegment, Weekday, WeekdayMap};
use crate::simulation::feasibility::FeasibilityReport;
use crate::simulation::metrics::LedgerMetrics;

/// One weekday of the daily metrics export.
#[derive(Debug, Clone, Serialize)]
pub struct DailyMetricsRecord {
    pub day: String,
    pub drop_points: u32,
    pub local_rte: f64,
    pub mthatha_rte: f64,
    pub other_country_rte: f64,
}

pub fn daily_records(metrics: &LedgerMetrics) -> Vec<DailyMetricsRecord> {
    Weekday::ALL
        .into_iter()
        .map(|day| DailyMetricsRecord {
            day: day.label().to_string(),
            drop_points: metrics.drop_points[day],
            local_rte: metrics.fleet.local[day],
            mthatha_rte: metrics.fleet.mthatha[day],
            other_country_rte: metrics.fleet.other_country[day],
        })
        .collect()
}

/// Writes drop points and segment RTE per weekday to a CSV file.
pub fn write_daily_metrics(
    file_path: impl AsRef<Path>,
    metrics: &LedgerMetrics,
) -> PlannerResult<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    for record in daily_records(metrics) {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    info!(path = %path.display(), "Exported daily metrics");
    Ok(())
}

fn render_days<T>(values: &WeekdayMap<T>, fmt_value: impl Fn(&T) -> String) -> String {
    let cells: Vec<String> = values
        .iter()
        .map(|(day, v)| format!("{day}: {}", fmt_value(v)))
        .collect();
    format!("{{{}}}", cells.join(", "))
}

/// Plain-text operator summary: mix, drop points and fleet load per day.
pub fn render_summary(metrics: &LedgerMetrics) -> String {
    let mut out = String::new();
    match &metrics.mix {
        Some(mix) => {
            let cells: Vec<String> = mix
                .iter()
                .map(|(freq, share)| format!("{freq}: {:.1}%", share * 100.0))
                .collect();
            let _ = writeln!(out, "SDVM mix: {{{}}}", cells.join(", "));
        }
        None => {
            let _ = writeln!(out, "SDVM mix: (no stores)");
        }
    }
    let _ = writeln!(
        out,
        "Drop-points/day: {}",
        render_days(&metrics.drop_points, |v| v.to_string())
    );
    for segment in FleetSegment::ALL {
        let _ = writeln!(
            out,
            "{segment} RTE/day: {}",
            render_days(metrics.fleet.segment(segment), |v| format!("{v:.1}"))
        );
    }
    out
}

pub fn render_feasibility(report: &FeasibilityReport) -> String {
    if report.is_feasible() {
        return "Feasible\n".to_string();
    }
    let mut out = String::from("NOT feasible - adjust plan\n");
    for violation in &report.violations {
        let _ = writeln!(out, "  {violation}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ConstraintSet, Frequency, SegmentCapacity, SegmentRules, StoreLedger, StoreRecord,
    };
    use crate::simulation::feasibility::{LimitKind, Violation};

    fn metrics() -> LedgerMetrics {
        let ledger = StoreLedger::new(vec![
            StoreRecord::new("L1", Frequency::new(2).unwrap())
                .with_group("Local")
                .with_avg_rte(1.5)
                .with_days(&[Weekday::Mon, Weekday::Tues]),
            StoreRecord::new("C1", Frequency::new(3).unwrap())
                .with_avg_rte(2.0)
                .with_days(&[Weekday::Wed, Weekday::Thur, Weekday::Fri]),
        ]);
        let constraints = ConstraintSet {
            drop_points_limit: 10,
            local: SegmentCapacity::new(1, 10.0),
            mthatha: SegmentCapacity::new(1, 10.0),
            other_country: SegmentCapacity::new(1, 10.0),
            rules: SegmentRules::default(),
        };
        LedgerMetrics::calculate(&ledger, &constraints)
    }

    #[test]
    fn test_render_summary() {
        let text = render_summary(&metrics());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "SDVM mix: {2: 50.0%, 3: 50.0%, 4: 0.0%, 5: 0.0%}");
        assert_eq!(lines[1], "Drop-points/day: {Mon: 1, Tues: 1, Wed: 1, Thur: 1, Fri: 1}");
        assert_eq!(
            lines[2],
            "Local RTE/day: {Mon: 1.5, Tues: 1.5, Wed: 0.0, Thur: 0.0, Fri: 0.0}"
        );
        assert_eq!(
            lines[4],
            "Other Country RTE/day: {Mon: 0.0, Tues: 0.0, Wed: 2.0, Thur: 2.0, Fri: 2.0}"
        );
    }

    #[test]
    fn test_daily_records() {
        let records = daily_records(&metrics());
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].day, "Mon");
        assert_eq!(records[0].drop_points, 1);
        assert_eq!(records[4].other_country_rte, 2.0);
    }

    #[test]
    fn test_render_feasibility() {
        assert_eq!(render_feasibility(&FeasibilityReport::default()), "Feasible\n");

        let report = FeasibilityReport {
            violations: vec![Violation {
                day: Weekday::Wed,
                limit: LimitKind::SegmentRte(FleetSegment::Mthatha),
                observed: 64.0,
                allowed: 60.0,
            }],
        };
        let text = render_feasibility(&report);
        assert!(text.starts_with("NOT feasible"));
        assert!(text.contains("Wed: Mthatha RTE 64.0 exceeds 60.0"));
    }
}
