//! Loads the salary sacrifice cap comparison datasets and derives the values
//! the dashboard narrative is written around.

pub mod config;
pub mod derive;
pub mod fetch;
pub mod process;
pub mod schema;

pub use config::Config;
pub use derive::{derive_narrative, Fallbacks, Narrative};
pub use fetch::{load_datasets, Source};
pub use process::{parse_csv, Cell, Dataset, DatasetMap, Record};
pub use schema::DatasetName;
