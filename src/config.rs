use serde::Deserialize;
use std::fs;

use crate::error::{Result, ScraperError};
use crate::filter::FilterConfig;

/// Top-level configuration, loaded from a TOML file. Every table is
/// optional; defaults reproduce the standard Palomar query.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub query: QueryConfig,
    pub output: OutputConfig,
    pub filters: FilterConfig,
}

/// Query parameters for the upstream transit-finder report.
///
/// These mirror the knobs the report endpoint accepts: which night, the
/// observatory geometry, and the coarse observability cuts applied server
/// side before the table is rendered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub base_url: String,
    /// Night of the observations, `MM-DD-YYYY` or `today`.
    pub date: String,
    pub observatory_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub observatory_timezone: String,
    pub days_to_print: u32,
    pub days_in_past: u32,
    pub minimum_start_elevation: f64,
    pub minimum_end_elevation: f64,
    /// Whether the start/end elevation cuts combine as "and" or "or".
    pub elevation_combinator: String,
    pub minimum_ha: f64,
    pub maximum_ha: f64,
    pub baseline_hrs: f64,
    pub maximum_priority: u32,
    pub minimum_depth: f64,
    pub twilight: i32,
    pub max_airmass: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://astro.swarthmore.edu/telescope/tess-secure/print_eclipses.cgi"
                .to_string(),
            date: "today".to_string(),
            observatory_name: "Palomar Observatory".to_string(),
            latitude: 33.3558,
            longitude: -116.865,
            observatory_timezone: "America/Los_Angeles".to_string(),
            days_to_print: 1,
            days_in_past: 0,
            minimum_start_elevation: 19.0,
            minimum_end_elevation: 19.0,
            elevation_combinator: "or".to_string(),
            minimum_ha: -6.4,
            maximum_ha: 6.4,
            baseline_hrs: 10.1,
            maximum_priority: 4,
            minimum_depth: 0.2,
            twilight: -12,
            max_airmass: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the dated CSV is written into.
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
        }
    }
}

impl OutputConfig {
    /// Default output path for a given observation date.
    pub fn target_path(&self, date: &str) -> String {
        format!("{}/TESS_Targets-{}.csv", self.dir.trim_end_matches('/'), date)
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{path}': {e}"))
        })?;

        let config: Config = toml::from_str(&content)?;
        config.filters.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.query.date, "today");
        assert_eq!(config.query.maximum_priority, 4);
        assert_eq!(config.output.dir, "output");
        assert!(!config.filters.magnitude_ceiling.enabled);
    }

    #[test]
    fn filters_parse_from_toml_tables() {
        let config: Config = toml::from_str(
            r#"
            [query]
            date = "02-05-2025"

            [filters.magnitude_ceiling]
            enabled = true
            max = 10.0

            [filters.start_time_window]
            enabled = true
            start = "12:00"
            end = "14:00"
            "#,
        )
        .unwrap();

        assert!(config.filters.validate().is_ok());
        assert!(config.filters.magnitude_ceiling.enabled);
        assert_eq!(config.filters.magnitude_ceiling.max, Some(10.0));
        assert_eq!(
            config.filters.start_time_window.start,
            chrono::NaiveTime::from_hms_opt(12, 0, 0)
        );
    }

    #[test]
    fn bad_window_time_is_a_parse_error() {
        let parsed: std::result::Result<Config, _> = toml::from_str(
            r#"
            [filters.start_time_window]
            enabled = true
            start = "noonish"
            end = "14:00"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn target_path_is_dated() {
        let output = OutputConfig::default();
        assert_eq!(
            output.target_path("02-05-2025"),
            "output/TESS_Targets-02-05-2025.csv"
        );
    }
}
