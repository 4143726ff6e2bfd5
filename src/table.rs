use scraper::{Html, Selector};
use tracing::debug;

use crate::constants::COL_NAME;
use crate::error::{Result, ScraperError};
use crate::types::RawRow;

/// Extract the candidate table from the fetched report page as raw rows.
///
/// Header texts are whitespace-collapsed (the upstream `<th>` cells carry
/// padding, newlines and tabs); cell texts are kept verbatim so the
/// normalizer sees exactly what the report rendered.
pub fn extract_rows(html: &str) -> Result<Vec<RawRow>> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table#target_table").unwrap();
    let th_selector = Selector::parse("th").unwrap();
    let tr_selector = Selector::parse("tr").unwrap();
    let td_selector = Selector::parse("td").unwrap();

    let table = document
        .select(&table_selector)
        .next()
        .ok_or(ScraperError::TableNotFound)?;

    let mut headers: Vec<String> = table
        .select(&th_selector)
        .map(|th| squish(&th.text().collect::<String>()))
        .collect();
    // The name column's header is a multi-line sort widget upstream; address
    // it by a stable label instead.
    if headers.len() > 1 {
        headers[1] = COL_NAME.to_string();
    }
    debug!("report table headers: {headers:?}");

    let mut rows = Vec::new();
    for tr in table.select(&tr_selector) {
        let cells: Vec<String> = tr
            .select(&td_selector)
            .map(|td| td.text().collect::<String>())
            .collect();
        // The header row renders th cells only.
        if cells.is_empty() {
            continue;
        }

        let mut row = RawRow::new();
        for (label, text) in headers.iter().zip(cells) {
            row.insert(label.clone(), text);
        }
        rows.push(row);
    }

    Ok(rows)
}

fn squish(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
