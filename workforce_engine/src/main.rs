//! Entry point for the Workforce Engine binary.
//!
//! Loads a dataset snapshot, runs the engines over it and writes the
//! resulting dashboard report to stdout as JSON.  The dataset path and
//! the projection date may be given as flags or through the
//! `WORKFORCE_DATASET` and `WORKFORCE_AS_OF` environment variables;
//! see `--help`.

use anyhow::{Context, Result};
use clap::Parser;
use workforce_engine::config::Config;
use workforce_engine::logging;
use workforce_engine::report::build_report;
use workforce_engine::source::{load_snapshot, JsonFileSource};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::parse();

    let source = JsonFileSource::new(&config.dataset);
    let snapshot = load_snapshot(&source).await?;

    let current_date = config.current_date();
    tracing::info!(%current_date, dataset = ?source.path(), "building report");
    let report = build_report(current_date, &snapshot, config.project)
        .context("failed to build report")?;

    let json = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}
