// src/extract/mod.rs
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// One show's reported numbers for one week at one theater.
///
/// Every field is kept as the text the page displays (currency and
/// percentage formatting included); only `week_date` is synthesized, from
/// the week label of the page the row came from.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeeklyRecord {
    pub show: String,
    pub theater: String,
    pub this_week_gross: String,
    pub potential_gross: String,
    pub avg_ticket_price: String,
    pub top_ticket_price: String,
    pub seats_sold: String,
    pub seats_in_theater: String,
    pub performances: String,
    pub previews: String,
    pub capacity: String,
    pub week_date: String,
}

/// Rows with fewer cells than this carry no grosses data (spacers, notes).
const MIN_COLUMNS: usize = 8;

/// Parse a grosses page and convert each qualifying table row into a
/// [`WeeklyRecord`].
///
/// Returns `None` when the grosses table itself is missing (malformed or
/// placeholder page), `Some(vec)` otherwise — possibly empty if no row
/// qualified. Rows missing a required value are dropped whole; optional
/// subtext values default to the empty string.
pub fn weekly_records(page_body: &str, week_label: &str) -> Option<Vec<WeeklyRecord>> {
    let table_sel = Selector::parse("table.bsp-table").expect("grosses table selector is valid");
    let row_sel = Selector::parse("tbody tr").expect("body row selector is valid");
    let cell_sel = Selector::parse("td").expect("cell selector is valid");
    let primary_sel = Selector::parse("span.data-value").expect("data-value selector is valid");
    let secondary_sel = Selector::parse("span.subtext").expect("subtext selector is valid");

    let document = Html::parse_document(page_body);
    let Some(table) = document.select(&table_sel).next() else {
        warn!("grosses table not found");
        return None;
    };

    let mut records = Vec::new();
    // Only tbody rows; the header lives in thead and never matches.
    for row in table.select(&row_sel) {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        if cells.len() < MIN_COLUMNS {
            continue;
        }

        let (Some(show), Some(theater)) = cell_values(cells[0], &primary_sel, &secondary_sel)
        else {
            continue;
        };
        let (Some(this_week_gross), potential_gross) =
            cell_values(cells[1], &primary_sel, &secondary_sel)
        else {
            continue;
        };
        let (Some(avg_ticket_price), top_ticket_price) =
            cell_values(cells[3], &primary_sel, &secondary_sel)
        else {
            continue;
        };
        let (Some(seats_sold), seats_in_theater) =
            cell_values(cells[4], &primary_sel, &secondary_sel)
        else {
            continue;
        };
        let (Some(performances), previews) = cell_values(cells[5], &primary_sel, &secondary_sel)
        else {
            continue;
        };
        let (Some(capacity), _) = cell_values(cells[6], &primary_sel, &secondary_sel) else {
            continue;
        };

        records.push(WeeklyRecord {
            show,
            theater,
            this_week_gross,
            potential_gross: potential_gross.unwrap_or_default(),
            avg_ticket_price,
            top_ticket_price: top_ticket_price.unwrap_or_default(),
            seats_sold,
            seats_in_theater: seats_in_theater.unwrap_or_default(),
            performances,
            previews: previews.unwrap_or_default(),
            capacity,
            week_date: week_label.to_string(),
        });
    }

    Some(records)
}

/// Read a cell's primary metric and optional subtext annotation.
///
/// All of the page's cells follow the same two-span layout, so this is the
/// single place that knows about it. Text is whitespace-trimmed.
fn cell_values(
    cell: ElementRef<'_>,
    primary: &Selector,
    secondary: &Selector,
) -> (Option<String>, Option<String>) {
    (select_text(cell, primary), select_text(cell, secondary))
}

fn select_text(cell: ElementRef<'_>, selector: &Selector) -> Option<String> {
    cell.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}
