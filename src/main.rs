use anyhow::{Context, Result};
use reqwest::Client;
use sscap::{derive_narrative, fetch, Config};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) config ───────────────────────────────────────────────────
    let config = Config::load()?;

    // ─── 2) init logging (stderr; stdout carries the narrative) ──────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!(source = %config.source, "startup");

    // ─── 3) load every dataset once ──────────────────────────────────
    let client = Client::new();
    let datasets = fetch::load_datasets(&client, &config.source).await;
    for name in datasets.absent() {
        debug!(dataset = %name, "rendering without dataset");
    }

    // ─── 4) derive and hand off ──────────────────────────────────────
    let narrative = derive_narrative(&datasets, &config.fallbacks);
    let json = serde_json::to_string_pretty(&narrative).context("serializing narrative")?;
    println!("{}", json);

    Ok(())
}
