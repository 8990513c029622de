// src/schema/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine datasets the data producer publishes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DatasetName {
    TaxBase,
    Population,
    WagesEmployment,
    Scenarios,
    RevenueDecomposition,
    ItLeakage,
    Distributional,
    WinnersLosers,
    Constituency,
}

impl DatasetName {
    pub const ALL: [DatasetName; 9] = [
        DatasetName::TaxBase,
        DatasetName::Population,
        DatasetName::WagesEmployment,
        DatasetName::Scenarios,
        DatasetName::RevenueDecomposition,
        DatasetName::ItLeakage,
        DatasetName::Distributional,
        DatasetName::WinnersLosers,
        DatasetName::Constituency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetName::TaxBase => "tax_base",
            DatasetName::Population => "population",
            DatasetName::WagesEmployment => "wages_employment",
            DatasetName::Scenarios => "scenarios",
            DatasetName::RevenueDecomposition => "revenue_decomposition",
            DatasetName::ItLeakage => "it_leakage",
            DatasetName::Distributional => "distributional",
            DatasetName::WinnersLosers => "winners_losers",
            DatasetName::Constituency => "constituency",
        }
    }

    /// File the producer writes this dataset to.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
