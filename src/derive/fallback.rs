use serde::{Deserialize, Serialize};

/// Values used when a derivation's source data is missing.
///
/// Every field can be overridden from the config file; omitted fields keep
/// the defaults below, which match the published analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    pub contributor_overshoot_pct: f64,
    pub tax_base_undershoot_pct: f64,
    pub avg_excess_undershoot_pct: f64,
    pub wage_alignment_pct: f64,
    pub pass_through_offset_bn: f64,
    pub nics_ratio_pct: i64,
    pub tax_base_ratio_pct: i64,
    pub top_decile_loss_gbp: f64,
    pub top_decile_loss_pct: f64,
    pub bottom_decile_loss_gbp: f64,
    pub avg_losers_pct: f64,
    pub peak_losers_decile: usize,
    pub peak_losers_pct: f64,
    pub aa_charge_increase_bn: f64,
    pub relief_shortfall_bn: f64,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            contributor_overshoot_pct: 9.0,
            tax_base_undershoot_pct: 28.0,
            avg_excess_undershoot_pct: 35.0,
            wage_alignment_pct: 2.5,
            pass_through_offset_bn: 0.53,
            nics_ratio_pct: 72,
            tax_base_ratio_pct: 72,
            top_decile_loss_gbp: 503.0,
            top_decile_loss_pct: 0.36,
            bottom_decile_loss_gbp: 2.0,
            avg_losers_pct: 11.2,
            peak_losers_decile: 8,
            peak_losers_pct: 24.9,
            aa_charge_increase_bn: 0.16,
            relief_shortfall_bn: 1.35,
        }
    }
}
