// src/derive/mod.rs
pub mod baseline;
pub mod decomposition;
pub mod distribution;
pub mod fallback;
pub mod format;
pub mod lookup;
pub mod scenarios;

use crate::process::DatasetMap;
use crate::schema::DatasetName;
use serde::Serialize;
use tracing::{debug, info};

pub use baseline::ComparisonRow;
pub use decomposition::DecompositionRow;
pub use distribution::{ConstituencyImpact, DecileExtremes, DecilePoint, PeakLosers};
pub use fallback::Fallbacks;
pub use scenarios::ScenarioRow;

use format::{format_bn, ordinal, percent, percent_1dp};

/// Every value the narrative binds, derived from one loaded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narrative {
    pub baseline_table: Vec<ComparisonRow>,
    pub population_table: Vec<ComparisonRow>,
    pub wages_table: Vec<ComparisonRow>,
    pub contributor_overshoot: String,
    pub tax_base_undershoot: String,
    pub avg_excess_undershoot: String,
    pub wage_alignment: String,
    pub scenarios: Vec<ScenarioRow>,
    pub pass_through_offset: String,
    pub nics_ratio_pct: i64,
    pub nics_gap_pct: i64,
    pub tax_base_ratio_pct: i64,
    pub decomposition_table: Vec<DecompositionRow>,
    pub aa_charge_increase: String,
    pub relief_shortfall: String,
    pub decile_extremes: DecileExtremes,
    pub worst_constituencies: Vec<ConstituencyImpact>,
    pub avg_losers_pct: String,
    pub peak_losers: PeakLosers,
    pub decile_series: Vec<DecilePoint>,
    /// Names of values that fell back to their constant.
    pub fallbacks_used: Vec<&'static str>,
}

/// Records which values could not be derived from data.
struct Resolver {
    used: Vec<&'static str>,
}

impl Resolver {
    fn resolve<T>(&mut self, name: &'static str, derived: Option<T>, fallback: T) -> T {
        match derived {
            Some(v) => v,
            None => {
                debug!(value = name, "using fallback");
                self.used.push(name);
                fallback
            }
        }
    }
}

/// Derive the full narrative. Missing datasets or rows never fail; each
/// value independently takes its entry from `fallbacks`.
pub fn derive_narrative(map: &DatasetMap, fallbacks: &Fallbacks) -> Narrative {
    let fb = fallbacks;
    let mut r = Resolver { used: Vec::new() };

    let contributor_overshoot = r.resolve(
        "contributor_overshoot",
        baseline::contributor_overshoot(map),
        fb.contributor_overshoot_pct,
    );
    let tax_base_undershoot = r.resolve(
        "tax_base_undershoot",
        baseline::tax_base_undershoot(map),
        fb.tax_base_undershoot_pct,
    );
    let avg_excess_undershoot = r.resolve(
        "avg_excess_undershoot",
        baseline::avg_excess_undershoot(map),
        fb.avg_excess_undershoot_pct,
    );
    let wage_alignment = r.resolve(
        "wage_alignment",
        baseline::wage_alignment(map),
        fb.wage_alignment_pct,
    );

    let pass_through_offset = r.resolve(
        "pass_through_offset",
        scenarios::pass_through_offset(map),
        fb.pass_through_offset_bn,
    );

    let nics_ratio_pct = r.resolve(
        "nics_ratio",
        decomposition::nics_ratio(map),
        fb.nics_ratio_pct,
    );
    let tax_base_ratio_pct = r.resolve(
        "tax_base_ratio",
        decomposition::tax_base_ratio(map),
        fb.tax_base_ratio_pct,
    );
    let aa_charge_increase = r.resolve(
        "aa_charge_increase",
        decomposition::leakage(map, decomposition::AA_CHARGE_INCREASE),
        fb.aa_charge_increase_bn,
    );
    let relief_shortfall = r.resolve(
        "relief_shortfall",
        decomposition::leakage(map, decomposition::RELIEF_SHORTFALL),
        fb.relief_shortfall_bn,
    );

    let decile_extremes = DecileExtremes {
        top_loss_gbp: r.resolve(
            "top_decile_loss",
            distribution::top_decile_loss(map),
            fb.top_decile_loss_gbp,
        ),
        top_loss_pct: r.resolve(
            "top_decile_loss_pct",
            distribution::top_decile_loss_pct(map),
            fb.top_decile_loss_pct,
        ),
        bottom_loss_gbp: r.resolve(
            "bottom_decile_loss",
            distribution::bottom_decile_loss(map),
            fb.bottom_decile_loss_gbp,
        ),
    };

    let avg_losers = r.resolve(
        "avg_losers",
        distribution::average_losers(map),
        fb.avg_losers_pct,
    );
    let peak_losers = r.resolve(
        "peak_losers",
        distribution::peak_losers(map),
        PeakLosers {
            decile: fb.peak_losers_decile,
            ordinal: ordinal(fb.peak_losers_decile)
                .unwrap_or_default()
                .to_string(),
            pct: fb.peak_losers_pct,
        },
    );

    let narrative = Narrative {
        baseline_table: baseline::baseline_table(map),
        population_table: baseline::comparison_table(map, DatasetName::Population),
        wages_table: baseline::comparison_table(map, DatasetName::WagesEmployment),
        contributor_overshoot: percent(contributor_overshoot),
        tax_base_undershoot: percent(tax_base_undershoot),
        avg_excess_undershoot: percent(avg_excess_undershoot),
        wage_alignment: percent_1dp(wage_alignment),
        scenarios: scenarios::ordered_scenarios(map),
        pass_through_offset: format!("{:.2}", pass_through_offset),
        nics_ratio_pct,
        nics_gap_pct: 100i64.saturating_sub(nics_ratio_pct),
        tax_base_ratio_pct,
        decomposition_table: decomposition::decomposition_table(map),
        aa_charge_increase: format_bn(aa_charge_increase),
        relief_shortfall: format_bn(relief_shortfall),
        decile_extremes,
        worst_constituencies: distribution::worst_constituencies(map),
        avg_losers_pct: format!("{:.1}", avg_losers),
        peak_losers,
        decile_series: distribution::decile_series(map),
        fallbacks_used: r.used,
    };

    info!(
        fallbacks = narrative.fallbacks_used.len(),
        scenarios = narrative.scenarios.len(),
        baseline_rows = narrative.baseline_table.len(),
        "narrative derived"
    );
    narrative
}
