use crate::process::{parse_csv, Dataset};
use crate::schema::DatasetName;
use serde::Serialize;
use std::collections::BTreeMap;

/// Loaded datasets keyed by name. A name with no entry failed to load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatasetMap {
    datasets: BTreeMap<DatasetName, Dataset>,
}

impl DatasetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse in-memory documents, e.g. fixtures or a bundled snapshot.
    pub fn from_documents<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = (DatasetName, &'a str)>,
    {
        let mut map = Self::new();
        for (name, text) in docs {
            map.insert(name, parse_csv(text));
        }
        map
    }

    pub fn insert(&mut self, name: DatasetName, dataset: Dataset) {
        self.datasets.insert(name, dataset);
    }

    pub fn get(&self, name: DatasetName) -> Option<&Dataset> {
        self.datasets.get(&name)
    }

    pub fn contains(&self, name: DatasetName) -> bool {
        self.datasets.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn absent(&self) -> Vec<DatasetName> {
        DatasetName::ALL
            .into_iter()
            .filter(|n| !self.contains(*n))
            .collect()
    }
}
