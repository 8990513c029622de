pub mod types;

use crate::process::Dataset;
use tracing::warn;

pub use types::DatasetName;

/// Columns the derivations read from each dataset.
pub fn expected_columns(name: DatasetName) -> &'static [&'static str] {
    match name {
        DatasetName::TaxBase | DatasetName::WagesEmployment => {
            &["metric", "pe", "obr", "unit", "ratio"]
        }
        DatasetName::Population => &["metric", "pe", "obr", "ratio"],
        DatasetName::Scenarios => &[
            "name",
            "pass_through_pct",
            "redirect_to_pension",
            "revenue_bn",
        ],
        DatasetName::RevenueDecomposition => &["component", "pe_change_bn", "obr_ss_equiv_bn"],
        DatasetName::ItLeakage => &["component", "change_bn"],
        DatasetName::Distributional => &[
            "decile",
            "avg_baseline",
            "avg_reformed",
            "avg_change_gbp",
            "pct_change",
        ],
        DatasetName::WinnersLosers => &["decile", "pct_losers", "pct_winners", "pct_no_change"],
        DatasetName::Constituency => &[
            "year",
            "constituency_code",
            "constituency_name",
            "avg_change",
        ],
    }
}

/// Expected columns absent from the dataset's header.
pub fn missing_columns(name: DatasetName, dataset: &Dataset) -> Vec<&'static str> {
    expected_columns(name)
        .iter()
        .copied()
        .filter(|col| !dataset.has_column(col))
        .collect()
}

/// Warn once per missing column. The dataset is kept either way; lookups
/// against a missing column take their fallback.
pub fn validate(name: DatasetName, dataset: &Dataset) -> bool {
    let missing = missing_columns(name, dataset);
    for col in &missing {
        warn!(dataset = %name, column = %col, "schema mismatch: expected column missing");
    }
    missing.is_empty()
}
