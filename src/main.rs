use anyhow::Result;
use bwayscraper::{collect, fetch::HttpTransport};
use chrono::NaiveDate;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// Reporting weeks to pull, newest first.
const START_DATE: &str = "2024-08-11";
const END_DATE: &str = "2024-07-28";

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let start_date = NaiveDate::parse_from_str(START_DATE, "%Y-%m-%d")?;
    let end_date = NaiveDate::parse_from_str(END_DATE, "%Y-%m-%d")?;

    let mut transport = HttpTransport::new()?;
    let total =
        collect::run_scrape(&mut transport, start_date, end_date, collect::OUTPUT_PATH).await?;
    info!("scrape complete: {total} records");
    Ok(())
}
