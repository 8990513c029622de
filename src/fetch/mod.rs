// src/fetch/mod.rs
pub mod urls;

use crate::process::{parse_csv, DatasetMap};
use crate::schema::{self, DatasetName};
use anyhow::{Context, Result};
use futures::{stream::FuturesUnordered, StreamExt};
use reqwest::Client;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

pub use urls::{Locator, Source};

/// Retrieve one document. Non-success HTTP statuses are errors.
pub async fn fetch_document(client: &Client, locator: &Locator) -> Result<String> {
    match locator {
        Locator::Url(url) => client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .await
            .with_context(|| format!("Reading text from {}", url)),
        Locator::Path(path) => fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display())),
    }
}

/// Fetch all nine datasets concurrently and parse each one.
///
/// Every attempt runs to completion before the map is returned. A dataset
/// that cannot be retrieved is logged and left out; this never fails.
#[instrument(level = "info", skip(client, source), fields(source = %source))]
pub async fn load_datasets(client: &Client, source: &Source) -> DatasetMap {
    let mut pending = DatasetName::ALL
        .into_iter()
        .map(|name| async move {
            let text = match source.locate(name) {
                Ok(locator) => {
                    debug!(dataset = %name, %locator, "fetching");
                    fetch_document(client, &locator).await
                }
                Err(e) => Err(e),
            };
            (name, text)
        })
        .collect::<FuturesUnordered<_>>();

    let mut map = DatasetMap::new();
    while let Some((name, text)) = pending.next().await {
        match text {
            Ok(text) => {
                let dataset = parse_csv(&text);
                schema::validate(name, &dataset);
                debug!(dataset = %name, rows = dataset.len(), "parsed");
                map.insert(name, dataset);
            }
            Err(e) => {
                warn!(dataset = %name, error = %format!("{:#}", e), "dataset unavailable");
            }
        }
    }

    info!(
        loaded = map.len(),
        absent = DatasetName::ALL.len() - map.len(),
        "datasets loaded"
    );
    map
}
