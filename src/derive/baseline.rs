//! Baseline comparison of the microsimulation against the official forecast.

use crate::derive::format::{relative_error, Unit};
use crate::derive::lookup::{self, ratio};
use crate::process::{DatasetMap, Record};
use crate::schema::DatasetName;
use serde::Serialize;

pub const CONTRIBUTORS: &str = "Total SS contributors";
pub const ABOVE_CAP_WORKERS: &str = "Workers above £2000 cap";
pub const TAX_BASE: &str = "SS tax base above £2k cap";
pub const AVG_EXCESS: &str = "Avg excess per worker";
pub const TOTAL_WAGES: &str = "Total wages and salaries";

/// Rows of the baseline table: (label, dataset, metric key, unit).
const BASELINE_METRICS: [(&str, DatasetName, &str, Unit); 5] = [
    ("Salary sacrifice contributors", DatasetName::Population, CONTRIBUTORS, Unit::Count),
    ("Workers above £2,000 cap", DatasetName::Population, ABOVE_CAP_WORKERS, Unit::Count),
    ("Total excess above cap", DatasetName::TaxBase, TAX_BASE, Unit::Billions),
    ("Average excess per worker", DatasetName::TaxBase, AVG_EXCESS, Unit::Pounds),
    ("Total wages and salaries", DatasetName::WagesEmployment, TOTAL_WAGES, Unit::Billions),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub primary: String,
    pub reference: String,
    pub error: String,
}

impl ComparisonRow {
    fn from_record(label: &str, record: &Record, unit: Unit) -> Self {
        let cell = |col: &str| {
            record
                .get(col)
                .map(|c| unit.format_cell(c))
                .unwrap_or_default()
        };
        Self {
            label: label.to_string(),
            primary: cell("pe"),
            reference: cell("obr"),
            error: ratio(record).map(relative_error).unwrap_or_default(),
        }
    }
}

/// The five headline comparison rows. Metrics whose row is missing are left out.
pub fn baseline_table(map: &DatasetMap) -> Vec<ComparisonRow> {
    BASELINE_METRICS
        .iter()
        .filter_map(|&(label, dataset, key, unit)| {
            lookup::find(map, dataset, key).map(|r| ComparisonRow::from_record(label, r, unit))
        })
        .collect()
}

/// Every row of a metric dataset in source order, formatted with the row's
/// own `unit` column (counts when the dataset has none).
pub fn comparison_table(map: &DatasetMap, dataset: DatasetName) -> Vec<ComparisonRow> {
    let Some(ds) = map.get(dataset) else {
        return Vec::new();
    };
    ds.iter()
        .map(|r| {
            let unit = r
                .get("unit")
                .and_then(|c| c.as_text())
                .map_or(Unit::Count, Unit::from_label);
            let label = r.text("metric").unwrap_or_default();
            ComparisonRow::from_record(&label, r, unit)
        })
        .collect()
}

fn metric_ratio(map: &DatasetMap, dataset: DatasetName, key: &str) -> Option<f64> {
    lookup::find(map, dataset, key).and_then(ratio)
}

/// How far the contributor count overshoots the reference, in percent.
pub fn contributor_overshoot(map: &DatasetMap) -> Option<f64> {
    metric_ratio(map, DatasetName::Population, CONTRIBUTORS).map(|r| ((r - 1.0) * 100.0).round())
}

/// How far the tax base falls short of the reference, in percent.
pub fn tax_base_undershoot(map: &DatasetMap) -> Option<f64> {
    metric_ratio(map, DatasetName::TaxBase, TAX_BASE).map(|r| ((1.0 - r) * 100.0).round())
}

pub fn avg_excess_undershoot(map: &DatasetMap) -> Option<f64> {
    metric_ratio(map, DatasetName::TaxBase, AVG_EXCESS).map(|r| ((1.0 - r) * 100.0).round())
}

/// Distance of total wages from the reference, one decimal place.
pub fn wage_alignment(map: &DatasetMap) -> Option<f64> {
    metric_ratio(map, DatasetName::WagesEmployment, TOTAL_WAGES)
        .map(|r| ((r - 1.0).abs() * 1000.0).round() / 10.0)
}
