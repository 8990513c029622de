use crate::derive::format::format_bn;
use crate::derive::lookup;
use crate::process::{Cell, DatasetMap};
use crate::schema::DatasetName;
use serde::Serialize;

pub const ABSORB_MAINTAIN: &str = "Absorb cost + Maintain pension";
pub const OBR_PASS_THROUGH_MAINTAIN: &str = "OBR 76% pass-through + Maintain pension";
pub const SPREAD_MAINTAIN: &str = "Spread cost + Maintain pension";
pub const ABSORB_CASH: &str = "Absorb cost + Take cash";
pub const SPREAD_CASH: &str = "Spread cost + Take cash";

/// Presentation order and display names, independent of the CSV row order.
pub const SCENARIO_ORDER: [(&str, &str); 5] = [
    (ABSORB_MAINTAIN, "Employers absorb cost, employees maintain pension"),
    (OBR_PASS_THROUGH_MAINTAIN, "76% passed through to wages, employees maintain pension"),
    (SPREAD_MAINTAIN, "Full pass-through to wages, employees maintain pension"),
    (ABSORB_CASH, "Employers absorb cost, employees take cash"),
    (SPREAD_CASH, "Full pass-through to wages, employees take cash"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRow {
    pub name: String,
    pub display_name: String,
    pub pass_through_pct: Option<f64>,
    pub redirect_to_pension: Option<bool>,
    pub revenue_bn: Option<f64>,
    pub revenue: String,
}

fn parse_flag(cell: &Cell) -> Option<bool> {
    match cell {
        Cell::Text(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Cell::Number(n) => Some(*n != 0.0),
    }
}

/// Scenarios present in the dataset, in canonical order with display names.
pub fn ordered_scenarios(map: &DatasetMap) -> Vec<ScenarioRow> {
    SCENARIO_ORDER
        .iter()
        .filter_map(|&(name, display)| {
            let row = lookup::find(map, DatasetName::Scenarios, name)?;
            let revenue_bn = row.number("revenue_bn");
            Some(ScenarioRow {
                name: name.to_string(),
                display_name: display.to_string(),
                pass_through_pct: row.number("pass_through_pct"),
                redirect_to_pension: row.get("redirect_to_pension").and_then(parse_flag),
                revenue_bn,
                revenue: revenue_bn.map(format_bn).unwrap_or_default(),
            })
        })
        .collect()
}

/// Revenue lost by moving from full absorption to the 76% pass-through
/// assumption, in £bn.
pub fn pass_through_offset(map: &DatasetMap) -> Option<f64> {
    let revenue = |name: &str| lookup::number(map, DatasetName::Scenarios, name, "revenue_bn");
    let absorb = revenue(ABSORB_MAINTAIN)?;
    let pass_through = revenue(OBR_PASS_THROUGH_MAINTAIN)?;
    Some((absorb - pass_through).abs())
}
