//! Revenue decomposition and income-tax leakage.

use crate::derive::baseline::TAX_BASE;
use crate::derive::format::format_bn;
use crate::derive::lookup::{self, ratio};
use crate::process::DatasetMap;
use crate::schema::DatasetName;
use serde::Serialize;

pub const NICS_SUBTOTAL: &str = "NICs subtotal";
pub const AA_CHARGE_INCREASE: &str = "AA tax charge increase";
pub const RELIEF_SHORTFALL: &str = "Relief shortfall";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecompositionRow {
    pub component: String,
    pub primary: String,
    pub reference: String,
}

/// NICs yield as a whole percentage of the reference figure.
pub fn nics_ratio(map: &DatasetMap) -> Option<i64> {
    let row = lookup::find(map, DatasetName::RevenueDecomposition, NICS_SUBTOTAL)?;
    let primary = row.number("pe_change_bn")?;
    let reference = row.number("obr_ss_equiv_bn")?;
    if reference == 0.0 {
        return None;
    }
    Some((primary / reference * 100.0).round() as i64)
}

/// Tax base as a whole percentage of the reference. Sourced separately from
/// [`nics_ratio`]; the two are expected, not required, to agree.
pub fn tax_base_ratio(map: &DatasetMap) -> Option<i64> {
    let row = lookup::find(map, DatasetName::TaxBase, TAX_BASE)?;
    ratio(row).map(|r| (r * 100.0).round() as i64)
}

pub fn decomposition_table(map: &DatasetMap) -> Vec<DecompositionRow> {
    let Some(ds) = map.get(DatasetName::RevenueDecomposition) else {
        return Vec::new();
    };
    let money = |v: Option<f64>| v.map(format_bn).unwrap_or_default();
    ds.iter()
        .map(|r| DecompositionRow {
            component: r.text("component").unwrap_or_default(),
            primary: money(r.number("pe_change_bn")),
            reference: money(r.number("obr_ss_equiv_bn")),
        })
        .collect()
}

/// £bn change of one income-tax leakage component.
pub fn leakage(map: &DatasetMap, component: &str) -> Option<f64> {
    lookup::number(map, DatasetName::ItLeakage, component, "change_bn")
}
