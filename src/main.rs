//! Cache Item inspector
//!
//! Builds a cache item from command-line arguments and prints its state.
//!
//! ```text
//! cache_item <key> <value-json> [expires-after-json]
//! ```

use std::env;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_item::EntryFactory;

const USAGE: &str = "usage: cache_item <key> <value-json> [expires-after-json]";

/// Entry point for the inspector.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the entry and apply the optional expiration
/// 4. Print the entry snapshot as JSON
fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_item=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = env::args().skip(1);
    let key = args.next().context(USAGE)?;
    let raw_value = args.next().context(USAGE)?;
    let value: Value = serde_json::from_str(&raw_value)
        .with_context(|| format!("Value is not valid JSON: {}", raw_value))?;

    let factory = EntryFactory::from_env();
    info!(default_ttl = ?factory.config().default_ttl, "Configuration loaded");

    let mut entry = factory.entry(key, value);

    if let Some(raw_expiry) = args.next() {
        let expiry: Value = serde_json::from_str(&raw_expiry)
            .with_context(|| format!("Expiration is not valid JSON: {}", raw_expiry))?;
        entry
            .expires_after(&expiry)
            .context("Failed to set expiration")?;
    }

    let snapshot = serde_json::to_string_pretty(&entry.snapshot())?;
    println!("{}", snapshot);

    Ok(())
}
