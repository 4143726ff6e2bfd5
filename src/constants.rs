//! Column labels of the upstream transit report table.
//!
//! These are the `<th>` texts of `table#target_table` after collapsing runs
//! of whitespace (the raw headers carry padding spaces, newlines and tabs).
//! The labels are a contract with the upstream report: a missing label is a
//! layout change and aborts normalization.

pub const COL_EVENING_DATE: &str = "Local evening date";
pub const COL_NAME: &str = "Name";
pub const COL_V_MAG: &str = "V mag";
pub const COL_PERIOD: &str = "Period (days)";
pub const COL_DEPTH: &str = "Depth (ppt)";
pub const COL_RADIUS: &str = "Rplanet(R⊕)";
pub const COL_TIMES: &str = "Start—Mid —End";
pub const COL_DURATION: &str = "Duration";
pub const COL_OBSERVABLE: &str = "% of transit (baseline) observable, Suggested obs. start, end";
pub const COL_COMMENTS: &str = "Comments and followup status";

/// Every column the normalizer reads, for upfront schema reporting.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    COL_EVENING_DATE,
    COL_NAME,
    COL_V_MAG,
    COL_PERIOD,
    COL_DEPTH,
    COL_RADIUS,
    COL_TIMES,
    COL_DURATION,
    COL_OBSERVABLE,
    COL_COMMENTS,
];
