use crate::process::{DatasetMap, Record};
use crate::schema::DatasetName;
use tracing::trace;

/// Discriminator column each keyed dataset is looked up by.
pub fn key_column(name: DatasetName) -> &'static str {
    match name {
        DatasetName::TaxBase | DatasetName::Population | DatasetName::WagesEmployment => "metric",
        DatasetName::Scenarios => "name",
        DatasetName::RevenueDecomposition | DatasetName::ItLeakage => "component",
        DatasetName::Distributional | DatasetName::WinnersLosers => "decile",
        DatasetName::Constituency => "constituency_code",
    }
}

/// First record of `name` whose key column equals `key`, if the dataset
/// loaded and such a row exists.
pub fn find<'a>(map: &'a DatasetMap, name: DatasetName, key: &str) -> Option<&'a Record> {
    let found = map.get(name)?.find(key_column(name), key);
    if found.is_none() {
        trace!(dataset = %name, key, "no matching row");
    }
    found
}

/// Numeric `column` of the row keyed by `key`.
pub fn number(map: &DatasetMap, name: DatasetName, key: &str, column: &str) -> Option<f64> {
    find(map, name, key)?.number(column)
}

/// `ratio` of a primary/reference comparison row, computed from `pe`/`obr`
/// when the producer left the ratio blank.
pub fn ratio(record: &Record) -> Option<f64> {
    record.number("ratio").or_else(|| {
        let pe = record.number("pe")?;
        let obr = record.number("obr")?;
        (obr != 0.0).then(|| pe / obr)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> DatasetMap {
        DatasetMap::from_documents([
            (
                DatasetName::Population,
                "metric,pe,obr,ratio\nTotal SS contributors,8400000,7700000,1.091\nTotal employed,36000000,35200000,",
            ),
            (
                DatasetName::ItLeakage,
                "component,change_bn\nRelief shortfall,1.41",
            ),
        ])
    }

    #[test]
    fn finds_by_dataset_key_column() {
        let m = map();
        assert_eq!(
            number(&m, DatasetName::Population, "Total SS contributors", "ratio"),
            Some(1.091)
        );
        assert_eq!(
            number(&m, DatasetName::ItLeakage, "Relief shortfall", "change_bn"),
            Some(1.41)
        );
    }

    #[test]
    fn absent_dataset_or_row_is_none() {
        let m = map();
        assert!(find(&m, DatasetName::TaxBase, "Avg excess per worker").is_none());
        assert!(find(&m, DatasetName::Population, "Nope").is_none());
    }

    #[test]
    fn ratio_is_recomputed_when_blank() {
        let m = map();
        let row = find(&m, DatasetName::Population, "Total employed").unwrap();
        let r = ratio(row).unwrap();
        assert!((r - 36.0 / 35.2).abs() < 1e-12);
    }
}
