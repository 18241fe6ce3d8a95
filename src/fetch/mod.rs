// src/fetch/mod.rs
use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::extract::{self, WeeklyRecord};

pub mod urls;

/// Retries after the first failed attempt, so at most `FETCH_RETRIES + 1`
/// requests go out per week.
pub const FETCH_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A completed HTTP exchange: status plus body text.
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

/// Transport seam for the fetch loop.
///
/// `Err` means a transport-level failure (connect, timeout, DNS, body read)
/// and is subject to retry; `Ok` with a non-2xx status is a definitive
/// "no data" answer from the server and is not.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&mut self, url: &str) -> Result<PageResponse>;
}

/// Live transport over a shared [`reqwest::Client`] with the fixed request
/// timeout applied.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&mut self, url: &str) -> Result<PageResponse> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(PageResponse { status, body })
    }
}

/// Fetch one week's grosses page and extract its records.
///
/// Transport failures are retried up to [`FETCH_RETRIES`] times with a fixed
/// delay between attempts, then degrade to `None`; a non-success status is
/// "no data for this week" immediately, with no retry. Nothing here is ever
/// a hard error — a lost week just drops out of the dataset.
pub async fn fetch_week<T: Transport>(
    transport: &mut T,
    url: &str,
    week_label: &str,
) -> Option<Vec<WeeklyRecord>> {
    let mut retries_left = FETCH_RETRIES;
    loop {
        match transport.get(url).await {
            Ok(page) if (200..300).contains(&page.status) => {
                return extract::weekly_records(&page.body, week_label);
            }
            Ok(page) => {
                warn!(status = page.status, "no data found for {url}, skipping");
                return None;
            }
            Err(e) => {
                error!("error fetching data for {url}: {e}");
                if retries_left == 0 {
                    return None;
                }
                sleep(RETRY_DELAY).await;
                retries_left -= 1;
            }
        }
    }
}
