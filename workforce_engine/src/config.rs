//! Command line and environment configuration for the binary.
//!
//! Every option can be supplied either as a flag or through a
//! `WORKFORCE_*` environment variable.

use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "workforce-engine")]
#[command(about = "Summarise work allocation and project hours to year end", version)]
pub struct Config {
    /// JSON snapshot with `employees`, `projects` and `workAssignments`
    #[arg(long, env = "WORKFORCE_DATASET", default_value = "dataset.json")]
    pub dataset: PathBuf,

    /// Date to project from (YYYY-MM-DD); defaults to today
    #[arg(long, env = "WORKFORCE_AS_OF")]
    pub as_of: Option<NaiveDate>,

    /// Include the per-employee series for this project id
    #[arg(long, env = "WORKFORCE_PROJECT")]
    pub project: Option<u32>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

impl Config {
    /// The injected current date, falling back to the local clock.
    pub fn current_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}
