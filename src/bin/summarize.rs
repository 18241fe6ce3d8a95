//! summarize.rs
//!
//! Standalone second-stage job: reads the historical grosses CSV and writes
//! a one-sentence-per-show summary table. Run after the scrape has produced
//! its dataset; no network access involved.

use anyhow::Result;
use bwayscraper::summary;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    summary::summarize(summary::INPUT_PATH, summary::OUTPUT_PATH)
}
