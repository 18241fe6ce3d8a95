// src/summary/mod.rs
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub const INPUT_PATH: &str = "broadway_data.csv";
pub const OUTPUT_PATH: &str = "broadway_show_summaries.csv";

// The input is addressed positionally, whatever its header row says.
const EXPECTED_COLUMNS: usize = 13;
const COL_SHOW: usize = 0;
const COL_THIS_WEEK_GROSS: usize = 2;
const COL_WEEK_DATE: usize = 11;

/// Per-show aggregates over the full dataset.
struct ShowStats {
    first_week: NaiveDate,
    last_week: NaiveDate,
    total_gross: f64,
    weeks: u64,
}

/// Read the historical grosses table at `input`, build one descriptive
/// sentence per show, and write the `show, description` table to `output`,
/// replacing any existing file.
///
/// The input must have 13 columns with bare numeric grosses and
/// `YYYY-MM-DD` week dates; anything else is a schema violation and fails
/// the whole job. Shows are emitted in order of first appearance.
pub fn summarize(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(input)
        .with_context(|| format!("opening {}", input.display()))?;

    let mut order: Vec<String> = Vec::new();
    let mut stats: HashMap<String, ShowStats> = HashMap::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("reading {} row {idx}", input.display()))?;
        if record.len() != EXPECTED_COLUMNS {
            bail!(
                "row {idx}: expected {EXPECTED_COLUMNS} columns, found {}",
                record.len()
            );
        }

        let show = record[COL_SHOW].trim().to_string();
        let gross: f64 = record[COL_THIS_WEEK_GROSS]
            .trim()
            .parse()
            .with_context(|| format!("row {idx}: this_week_gross is not numeric"))?;
        let week_date = NaiveDate::parse_from_str(record[COL_WEEK_DATE].trim(), "%Y-%m-%d")
            .with_context(|| format!("row {idx}: week_date is not an ISO date"))?;

        match stats.get_mut(&show) {
            Some(entry) => {
                entry.first_week = entry.first_week.min(week_date);
                entry.last_week = entry.last_week.max(week_date);
                entry.total_gross += gross;
                entry.weeks += 1;
            }
            None => {
                order.push(show.clone());
                stats.insert(
                    show,
                    ShowStats {
                        first_week: week_date,
                        last_week: week_date,
                        total_gross: gross,
                        weeks: 1,
                    },
                );
            }
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record(["show", "description"])?;

    for show in &order {
        let entry = &stats[show];
        let avg_gross = entry.total_gross / entry.weeks as f64;
        let description = format!(
            "The show '{show}' ran from {start} to {end}. It had an average weekly \
             revenue of ${avg} and a total revenue of ${total}.",
            start = entry.first_week.format("%Y-%m-%d"),
            end = entry.last_week.format("%Y-%m-%d"),
            avg = format_currency(avg_gross),
            total = format_currency(entry.total_gross),
        );
        writer.write_record([show.as_str(), &description])?;
    }

    writer
        .flush()
        .with_context(|| format!("writing {}", output.display()))?;
    info!(shows = order.len(), "summaries saved to {}", output.display());
    Ok(())
}

/// Format an amount with two decimals and comma thousands grouping,
/// e.g. `1234567.8` -> `1,234,567.80`.
fn format_currency(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (int_part, frac_part) = fixed.split_once('.').expect("fixed format has a decimal point");
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "show,theater,this_week_gross,potential_gross,avg_ticket_price,\
                          top_ticket_price,seats_sold,seats_in_theater,performances,previews,\
                          capacity,week_date,decade";

    fn data_row(show: &str, gross: &str, week_date: &str) -> String {
        format!("{show},Some Theatre,{gross},0,100.0,0,8000,0,8,0,90.0,{week_date},2020")
    }

    fn write_input(lines: &[String]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broadway_data.csv");
        let mut contents = String::from(HEADER);
        for line in lines {
            contents.push('\n');
            contents.push_str(line);
        }
        contents.push('\n');
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn describes_date_range_and_revenue() {
        let (dir, input) = write_input(&[
            data_row("X", "1000", "2024-01-01"),
            data_row("X", "3000", "2024-01-08"),
        ]);
        let output = dir.path().join("summaries.csv");
        summarize(&input, &output).unwrap();

        let contents = fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines[0], "show,description");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("ran from 2024-01-01 to 2024-01-08"));
        assert!(lines[1]
            .contains("average weekly revenue of $2,000.00 and a total revenue of $4,000.00"));
    }

    #[test]
    fn shows_are_emitted_in_first_appearance_order() {
        let (dir, input) = write_input(&[
            data_row("Wicked", "1000", "2024-01-01"),
            data_row("Hamilton", "2000", "2024-01-01"),
            data_row("Wicked", "1500", "2024-01-08"),
            data_row("Chicago", "500", "2024-01-08"),
        ]);
        let output = dir.path().join("summaries.csv");
        summarize(&input, &output).unwrap();

        let contents = fs::read_to_string(&output).unwrap();
        let shows: Vec<_> = contents
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap().to_string())
            .collect();
        assert_eq!(shows, ["Wicked", "Hamilton", "Chicago"]);
    }

    #[test]
    fn date_range_ignores_input_row_order() {
        let (dir, input) = write_input(&[
            data_row("X", "1000", "2024-03-10"),
            data_row("X", "1000", "2024-01-07"),
            data_row("X", "1000", "2024-02-04"),
        ]);
        let output = dir.path().join("summaries.csv");
        summarize(&input, &output).unwrap();

        let contents = fs::read_to_string(&output).unwrap();
        assert!(contents.contains("ran from 2024-01-07 to 2024-03-10"));
    }

    #[test]
    fn non_numeric_gross_is_fatal() {
        let (dir, input) = write_input(&[data_row("X", "$1,000.00", "2024-01-01")]);
        let output = dir.path().join("summaries.csv");
        let err = summarize(&input, &output).unwrap_err();
        assert!(err.to_string().contains("this_week_gross"));
    }

    #[test]
    fn malformed_date_is_fatal() {
        let (dir, input) = write_input(&[data_row("X", "1000", "01/07/2024")]);
        let output = dir.path().join("summaries.csv");
        let err = summarize(&input, &output).unwrap_err();
        assert!(err.to_string().contains("week_date"));
    }

    #[test]
    fn wrong_column_count_is_fatal() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broadway_data.csv");
        fs::write(&input, "show,gross\nX,1000\n").unwrap();
        let output = dir.path().join("summaries.csv");
        assert!(summarize(&input, &output).is_err());
    }

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(999.999), "1,000.00");
        assert_eq!(format_currency(2000.0), "2,000.00");
        assert_eq!(format_currency(1234567.8), "1,234,567.80");
        assert_eq!(format_currency(-54321.5), "-54,321.50");
    }
}
