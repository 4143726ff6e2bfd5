//! Row Normalizer: fixed positional de-multiplexing of the report's compound
//! text cells into typed [`TransitRecord`] fields.
//!
//! The upstream report packs several logical values into single cells
//! ("start—mid—end" times, duration with its uncertainty, transit and
//! baseline observability). Each rule below validates its minimum token
//! count before indexing so that layout drift fails loudly as a skipped row
//! instead of silently misassigning fields.

use chrono::NaiveTime;
use tracing::{info, warn};

use crate::constants::*;
use crate::error::{Result, ScraperError};
use crate::types::{RawRow, TransitRecord};

/// Outcome of one normalization pass over a scraped table.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    /// Successfully normalized records, in table order.
    pub records: Vec<TransitRecord>,
    /// One diagnostic per row dropped as malformed.
    pub skipped: Vec<String>,
}

/// Normalize every raw row into a [`TransitRecord`], in order.
///
/// Malformed rows are skipped with a warning and reported in
/// [`NormalizedBatch::skipped`]; a missing column aborts the whole batch
/// with [`ScraperError::SchemaMismatch`].
pub fn normalize(rows: &[RawRow]) -> Result<NormalizedBatch> {
    if let Some(first) = rows.first() {
        for column in REQUIRED_COLUMNS {
            if first.get(column).is_none() {
                return Err(ScraperError::SchemaMismatch { column });
            }
        }
    }

    let mut batch = NormalizedBatch::default();
    for (index, row) in rows.iter().enumerate() {
        match normalize_row(index, row) {
            Ok(record) => batch.records.push(record),
            Err(err @ ScraperError::MalformedRow { .. }) => {
                warn!("skipping row: {err}");
                batch.skipped.push(err.to_string());
            }
            Err(fatal) => return Err(fatal),
        }
    }
    Ok(batch)
}

fn normalize_row(index: usize, row: &RawRow) -> Result<TransitRecord> {
    let name_tokens = cell_tokens(row, COL_NAME)?;
    require_tokens(index, COL_NAME, &name_tokens, 4)?;
    let object_name = format!(
        "{} {}",
        name_tokens[2].trim_start_matches('('),
        name_tokens[3].trim_end_matches(')')
    );

    let mag_tokens = cell_tokens(row, COL_V_MAG)?;
    require_tokens(index, COL_V_MAG, &mag_tokens, 1)?;
    let v_mag = float_token(index, COL_V_MAG, mag_tokens[0])?;

    let period_days = float_token(index, COL_PERIOD, cell(row, COL_PERIOD)?.trim())?;
    let depth_ppt = float_token(index, COL_DEPTH, cell(row, COL_DEPTH)?.trim())?;
    let radius_re = radius(index, row, &object_name)?;

    let date_tokens = cell_tokens(row, COL_EVENING_DATE)?;
    require_tokens(index, COL_EVENING_DATE, &date_tokens, 2)?;
    let evening_date = format!("{} {}", date_tokens[0], date_tokens[1]);

    let time_tokens = cell_tokens(row, COL_TIMES)?;
    require_tokens(index, COL_TIMES, &time_tokens, 4)?;
    // Start and end carry a range-separator dash artifact ("—12:34" style).
    let start_time = hhmm(index, COL_TIMES, &time_tokens[1].replace('—', ""))?;
    let mid_time = hhmm(index, COL_TIMES, time_tokens[2])?;
    let end_time = hhmm(index, COL_TIMES, &time_tokens[3].replace('—', ""))?;

    let duration_tokens = cell_tokens(row, COL_DURATION)?;
    require_tokens(index, COL_DURATION, &duration_tokens, 2)?;
    let duration_hours = duration_tokens[0].to_string();
    let duration_uncertainty_hours = duration_tokens[1].replace('±', "");

    let obs_tokens = cell_tokens(row, COL_OBSERVABLE)?;
    require_tokens(index, COL_OBSERVABLE, &obs_tokens, 2)?;
    let percent_transit_observable = obs_tokens[0].to_string();
    let percent_baseline_observable = obs_tokens[1]
        .trim_start_matches('(')
        .trim_end_matches(')')
        .to_string();

    let comments = cell(row, COL_COMMENTS)?.trim().to_string();

    Ok(TransitRecord {
        object_name,
        v_mag,
        period_days,
        depth_ppt,
        radius_re,
        evening_date,
        start_time,
        mid_time,
        end_time,
        duration_hours,
        duration_uncertainty_hours,
        percent_transit_observable,
        percent_baseline_observable,
        comments,
    })
}

/// A blank radius is an expected, common case: default to 0.0 with a
/// data-quality note rather than dropping the row.
fn radius(index: usize, row: &RawRow, object_name: &str) -> Result<f64> {
    let raw = cell(row, COL_RADIUS)?;
    if raw.trim().is_empty() {
        info!("no radius available for {object_name}");
        return Ok(0.0);
    }
    float_token(index, COL_RADIUS, raw.trim())
}

fn cell<'a>(row: &'a RawRow, column: &'static str) -> Result<&'a str> {
    row.get(column)
        .ok_or(ScraperError::SchemaMismatch { column })
}

fn cell_tokens<'a>(row: &'a RawRow, column: &'static str) -> Result<Vec<&'a str>> {
    Ok(cell(row, column)?.split_whitespace().collect())
}

fn require_tokens(row: usize, cell: &'static str, tokens: &[&str], min: usize) -> Result<()> {
    if tokens.len() < min {
        return Err(ScraperError::MalformedRow {
            row,
            cell,
            reason: format!("expected at least {min} tokens, found {}", tokens.len()),
        });
    }
    Ok(())
}

fn float_token(row: usize, cell: &'static str, token: &str) -> Result<f64> {
    token.parse().map_err(|_| ScraperError::MalformedRow {
        row,
        cell,
        reason: format!("'{token}' is not numeric"),
    })
}

/// Times must already be HH:MM here so the filter pipeline never has to
/// fail on a time parse.
fn hhmm(row: usize, cell: &'static str, value: &str) -> Result<String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ScraperError::MalformedRow {
        row,
        cell,
        reason: format!("'{value}' is not an HH:MM time"),
    })?;
    Ok(value.to_string())
}
