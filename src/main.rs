use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use postscope::{config::Config, dataset, fetcher::LiveFetcher, ingest};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    let export = ingest::latest_export(config.export_dir()).with_context(|| {
        format!(
            "discovering analytics export in {}",
            config.export_dir().display()
        )
    })?;
    info!("using export {}", export.display());

    let records =
        ingest::parse_export(&export).with_context(|| format!("parsing {}", export.display()))?;

    let fetcher = Arc::new(LiveFetcher::new(config.fetch_delay_ms()));
    let rows = dataset::build(&records, fetcher, config.fetch_concurrency()).await;

    let output = File::create(config.output_path())
        .with_context(|| format!("creating {}", config.output_path().display()))?;
    dataset::csv::write_dataset(BufWriter::new(output), &rows)?;

    info!(
        "wrote {} rows to {}",
        rows.len(),
        config.output_path().display()
    );
    Ok(())
}
