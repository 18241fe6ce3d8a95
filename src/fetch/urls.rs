// src/fetch/urls.rs
use chrono::{Duration, NaiveDate};

/// Weekly grosses endpoint; the reporting week is selected by query string.
pub const GROSSES_BASE_URL: &str = "https://www.playbill.com/grosses?week=";

/// Walk backwards from `start_date` to `end_date` in 7-day steps, yielding a
/// `(url, week_label)` pair for every reporting week in the range.
///
/// The guard runs before each step, so any date `>= end_date` is emitted and
/// the sequence stops at the first date that would fall below it. Calling
/// this again yields a fresh sequence.
pub fn week_urls(
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> impl Iterator<Item = (String, String)> {
    std::iter::successors(Some(start_date), |date| Some(*date - Duration::days(7)))
        .take_while(move |date| *date >= end_date)
        .map(|date| {
            let week_label = date.format("%Y-%m-%d").to_string();
            (format!("{GROSSES_BASE_URL}{week_label}"), week_label)
        })
}
