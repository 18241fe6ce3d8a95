// src/collect/mod.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::Rng;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use crate::extract::WeeklyRecord;
use crate::fetch::{self, urls, Transport};

pub const OUTPUT_PATH: &str = "broadway_grosses_historical_new.csv";

/// Column headers of the scrape output, in record field order. The source
/// page's "DIFF $" and "DIFF % CAP" columns are deliberately not carried.
pub const CSV_HEADER: [&str; 12] = [
    "SHOW",
    "THEATER",
    "THIS WEEK GROSS",
    "POTENTIAL GROSS",
    "AVG TICKET PRICE",
    "TOP TICKET PRICE",
    "SEATS SOLD",
    "SEATS IN THEATER",
    "PERFORMANCES",
    "PREVIEWS",
    "CAPACITY %",
    "WEEK DATE",
];

/// Politeness delay between requests, sampled uniformly per iteration.
const PAUSE_MILLIS: std::ops::RangeInclusive<u64> = 50..=200;

/// Ordered accumulation of every record the run produced.
#[derive(Debug, Default)]
pub struct Collector {
    records: Vec<WeeklyRecord>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's records, preserving row order.
    pub fn extend(&mut self, records: Vec<WeeklyRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[WeeklyRecord] {
        &self.records
    }

    /// Write header plus all records to `path`, replacing any existing file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(CSV_HEADER)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer
            .flush()
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// Run the full scrape: fetch every week from `start_date` back to
/// `end_date`, collect the extracted records, and write them to `out_path`.
///
/// Weeks that come back empty are logged and dropped; the output file carries
/// no gap markers for them. Returns the number of records written.
pub async fn run_scrape<T: Transport>(
    transport: &mut T,
    start_date: NaiveDate,
    end_date: NaiveDate,
    out_path: impl AsRef<Path>,
) -> Result<usize> {
    let mut collector = Collector::new();

    for (url, week_label) in urls::week_urls(start_date, end_date) {
        info!("fetching data from: {url}");
        match fetch::fetch_week(transport, &url, &week_label).await {
            Some(records) => collector.extend(records),
            None => info!("skipping week {week_label}"),
        }
        let pause = Duration::from_millis(rand::rng().random_range(PAUSE_MILLIS));
        sleep(pause).await;
    }

    collector.write_csv(&out_path)?;
    info!(
        records = collector.len(),
        "data saved to {}",
        out_path.as_ref().display()
    );
    Ok(collector.len())
}
