use serde::Serialize;

/// A single scraped table row: ordered mapping from column label to the raw
/// cell text, exactly as rendered (padding and embedded newlines included).
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.cells.push((label.into(), text.into()));
    }

    /// Raw text of the cell under `label`, if the column is present.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, t)| t.as_str())
    }
}

/// A fully normalized transit observation candidate.
///
/// Field order is the CSV column order handed to downstream consumers; the
/// serde renames are the exact output header names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitRecord {
    #[serde(rename = "Object Name")]
    pub object_name: String,
    #[serde(rename = "Vmag")]
    pub v_mag: f64,
    #[serde(rename = "Period (days)")]
    pub period_days: f64,
    #[serde(rename = "Depth (ppt)")]
    pub depth_ppt: f64,
    #[serde(rename = "Radius (Re)")]
    pub radius_re: f64,
    #[serde(rename = "Local Evening Date")]
    pub evening_date: String,
    #[serde(rename = "Start Time (UTC)")]
    pub start_time: String,
    #[serde(rename = "Mid Time (UTC)")]
    pub mid_time: String,
    #[serde(rename = "End Time (UTC)")]
    pub end_time: String,
    #[serde(rename = "Duration (hours)")]
    pub duration_hours: String,
    #[serde(rename = "Uncert. Duration (hours)")]
    pub duration_uncertainty_hours: String,
    #[serde(rename = "Percent Trans Obs.")]
    pub percent_transit_observable: String,
    #[serde(rename = "Percent Base Obs.")]
    pub percent_baseline_observable: String,
    #[serde(rename = "Comments")]
    pub comments: String,
}
