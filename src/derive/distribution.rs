//! Household-level impact: income deciles, winners/losers and constituencies.

use crate::derive::format::ordinal;
use crate::process::{DatasetMap, Record};
use crate::schema::DatasetName;
use serde::Serialize;
use std::cmp::Ordering;

const TOP_DECILE: usize = 9;
const BOTTOM_DECILE: usize = 0;
const WORST_CONSTITUENCIES: usize = 5;

/// Size of the loss at each end of the income distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecileExtremes {
    pub top_loss_gbp: f64,
    pub top_loss_pct: f64,
    pub bottom_loss_gbp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstituencyImpact {
    pub name: String,
    pub code: String,
    pub avg_change: f64,
}

/// Decile with the largest share of losing households.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakLosers {
    pub decile: usize,
    pub ordinal: String,
    pub pct: f64,
}

/// One point of the per-decile chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecilePoint {
    pub decile: usize,
    pub avg_change_gbp: Option<f64>,
    pub pct_change: Option<f64>,
    pub pct_losers: Option<f64>,
}

fn decile_row(map: &DatasetMap, index: usize) -> Option<&Record> {
    map.get(DatasetName::Distributional)?.get(index)
}

/// Absolute £ loss of the highest decile. Rows are in decile order 1–10, so
/// the highest decile is the tenth row; nothing is sorted.
pub fn top_decile_loss(map: &DatasetMap) -> Option<f64> {
    decile_row(map, TOP_DECILE)?
        .number("avg_change_gbp")
        .map(f64::abs)
}

pub fn top_decile_loss_pct(map: &DatasetMap) -> Option<f64> {
    decile_row(map, TOP_DECILE)?.number("pct_change").map(f64::abs)
}

pub fn bottom_decile_loss(map: &DatasetMap) -> Option<f64> {
    decile_row(map, BOTTOM_DECILE)?
        .number("avg_change_gbp")
        .map(f64::abs)
}

/// The five constituencies with the largest average loss, worst first.
/// Empty when the dataset is missing or no constituency loses.
pub fn worst_constituencies(map: &DatasetMap) -> Vec<ConstituencyImpact> {
    let Some(ds) = map.get(DatasetName::Constituency) else {
        return Vec::new();
    };
    let mut losing: Vec<ConstituencyImpact> = ds
        .iter()
        .filter_map(|r| {
            let avg_change = r.number("avg_change")?;
            (avg_change < 0.0).then(|| ConstituencyImpact {
                name: r.text("constituency_name").unwrap_or_default(),
                code: r.text("constituency_code").unwrap_or_default(),
                avg_change,
            })
        })
        .collect();
    losing.sort_by(|a, b| {
        a.avg_change
            .partial_cmp(&b.avg_change)
            .unwrap_or(Ordering::Equal)
    });
    losing.truncate(WORST_CONSTITUENCIES);
    losing
}

fn losers(map: &DatasetMap) -> Option<impl Iterator<Item = f64> + '_> {
    Some(
        map.get(DatasetName::WinnersLosers)?
            .iter()
            .filter_map(|r| r.number("pct_losers")),
    )
}

/// Unweighted mean of the per-decile loser shares.
pub fn average_losers(map: &DatasetMap) -> Option<f64> {
    let (sum, n) = losers(map)?.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// The row's own `decile` column, or its 1-based position when that is absent.
fn decile_number(record: &Record, index: usize) -> usize {
    record
        .number("decile")
        .filter(|d| *d >= 1.0)
        .map_or(index + 1, |d| d as usize)
}

/// Decile with the highest loser share. Ties keep the earliest row.
pub fn peak_losers(map: &DatasetMap) -> Option<PeakLosers> {
    let ds = map.get(DatasetName::WinnersLosers)?;
    let (decile, pct) = ds
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.number("pct_losers").map(|v| (decile_number(r, i), v)))
        .fold(None, |best: Option<(usize, f64)>, (d, v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((d, v)),
        })?;
    Some(PeakLosers {
        decile,
        ordinal: ordinal(decile)?.to_string(),
        pct,
    })
}

/// Distributional rows joined with the matching loser share, in dataset order.
pub fn decile_series(map: &DatasetMap) -> Vec<DecilePoint> {
    let Some(ds) = map.get(DatasetName::Distributional) else {
        return Vec::new();
    };
    let winners = map.get(DatasetName::WinnersLosers);
    ds.iter()
        .enumerate()
        .map(|(i, r)| {
            let decile = decile_number(r, i);
            let pct_losers = winners
                .and_then(|w| w.find("decile", &decile.to_string()))
                .and_then(|w| w.number("pct_losers"));
            DecilePoint {
                decile,
                avg_change_gbp: r.number("avg_change_gbp"),
                pct_change: r.number("pct_change"),
                pct_losers,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISTRIBUTIONAL: &str = "decile,avg_baseline,avg_reformed,avg_change_gbp,pct_change
1,18000,17998,-2,-0.01
2,24000,23995,-5,-0.02
3,29000,28990,-10,-0.03
4,34000,33985,-15,-0.04
5,39000,38975,-25,-0.06
6,45000,44960,-40,-0.09
7,52000,51930,-70,-0.13
8,61000,60880,-120,-0.20
9,76000,75780,-220,-0.29
10,140000,139497,-503,-0.36";

    fn winners(values: &[f64]) -> String {
        let mut doc = String::from("decile,pct_losers,pct_winners,pct_no_change\n");
        for (i, v) in values.iter().enumerate() {
            doc.push_str(&format!("{},{},0.0,{}\n", i + 1, v, 100.0 - v));
        }
        doc
    }

    #[test]
    fn test_decile_extremes_by_position() {
        let map = DatasetMap::from_documents([(DatasetName::Distributional, DISTRIBUTIONAL)]);
        assert_eq!(top_decile_loss(&map), Some(503.0));
        assert_eq!(top_decile_loss_pct(&map), Some(0.36));
        assert_eq!(bottom_decile_loss(&map), Some(2.0));
    }

    #[test]
    fn test_short_distribution_has_no_top_decile() {
        let short = DISTRIBUTIONAL.lines().take(4).collect::<Vec<_>>().join("\n");
        let map = DatasetMap::from_documents([(DatasetName::Distributional, short.as_str())]);
        assert_eq!(top_decile_loss(&map), None);
        assert_eq!(bottom_decile_loss(&map), Some(2.0));
    }

    #[test]
    fn test_worst_constituencies() {
        let doc = "year,constituency_code,constituency_name,avg_change
2029-30,E1,Alpha,-10
2029-30,E2,Bravo,25
2029-30,E3,Charlie,-100
2029-30,E4,Delta,-5
2029-30,E5,Echo,3
2029-30,E6,Foxtrot,-50
2029-30,E7,Golf,-30
2029-30,E8,Hotel,0.5";
        let map = DatasetMap::from_documents([(DatasetName::Constituency, doc)]);
        let worst = worst_constituencies(&map);
        let changes: Vec<f64> = worst.iter().map(|c| c.avg_change).collect();
        let names: Vec<&str> = worst.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(changes, vec![-100.0, -50.0, -30.0, -10.0, -5.0]);
        assert_eq!(names, vec!["Charlie", "Foxtrot", "Golf", "Alpha", "Delta"]);
        assert_eq!(worst[0].code, "E3");
    }

    #[test]
    fn test_worst_constituencies_caps_at_five() {
        let mut doc = String::from("year,constituency_code,constituency_name,avg_change\n");
        for i in 1..=8 {
            doc.push_str(&format!("2029-30,C{i},Seat {i},-{i}\n"));
        }
        let map = DatasetMap::from_documents([(DatasetName::Constituency, doc.as_str())]);
        let worst = worst_constituencies(&map);
        assert_eq!(worst.len(), 5);
        assert_eq!(worst[0].name, "Seat 8");
        assert_eq!(worst[4].name, "Seat 4");
    }

    #[test]
    fn test_no_constituency_data_is_empty() {
        assert!(worst_constituencies(&DatasetMap::new()).is_empty());
    }

    #[test]
    fn test_average_losers_is_unweighted() {
        let doc = winners(&[10.0, 20.0, 30.0, 40.0]);
        let map = DatasetMap::from_documents([(DatasetName::WinnersLosers, doc.as_str())]);
        assert_eq!(average_losers(&map), Some(25.0));

        let empty = DatasetMap::from_documents([(
            DatasetName::WinnersLosers,
            "decile,pct_losers,pct_winners,pct_no_change",
        )]);
        assert_eq!(average_losers(&empty), None);
        assert_eq!(peak_losers(&empty), None);
    }

    #[test]
    fn test_peak_losers_tie_keeps_first() {
        let doc = winners(&[1.0, 5.0, 24.9, 10.0, 12.0, 15.0, 24.9, 20.0, 8.0, 3.0]);
        let map = DatasetMap::from_documents([(DatasetName::WinnersLosers, doc.as_str())]);
        let peak = peak_losers(&map).unwrap();
        assert_eq!(peak.decile, 3);
        assert_eq!(peak.ordinal, "third");
        assert_eq!(peak.pct, 24.9);
    }

    #[test]
    fn test_peak_losers_reads_decile_column() {
        // decile 1 had no households, so the rows start at 2
        let mut doc = String::from("decile,pct_losers,pct_winners,pct_no_change\n");
        for (d, v) in (2..=10).zip([1.0, 5.0, 10.0, 12.0, 15.0, 20.0, 24.9, 8.0, 3.0]) {
            doc.push_str(&format!("{},{},0.0,{}\n", d, v, 100.0 - v));
        }
        let map = DatasetMap::from_documents([(DatasetName::WinnersLosers, doc.as_str())]);
        let peak = peak_losers(&map).unwrap();
        assert_eq!(peak.decile, 8);
        assert_eq!(peak.ordinal, "eighth");

        let positional = DatasetMap::from_documents([(
            DatasetName::WinnersLosers,
            "decile,pct_losers\n,4.0\nn/a,9.0",
        )]);
        assert_eq!(peak_losers(&positional).unwrap().ordinal, "second");
    }

    #[test]
    fn test_decile_series_joins_loser_share() {
        let doc = winners(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let map = DatasetMap::from_documents([
            (DatasetName::Distributional, DISTRIBUTIONAL),
            (DatasetName::WinnersLosers, doc.as_str()),
        ]);
        let series = decile_series(&map);
        assert_eq!(series.len(), 10);
        assert_eq!(
            series[9],
            DecilePoint {
                decile: 10,
                avg_change_gbp: Some(-503.0),
                pct_change: Some(-0.36),
                pct_losers: Some(10.0),
            }
        );
    }
}
