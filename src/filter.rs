//! Filter Pipeline: composable inclusion/exclusion predicates over the
//! normalized record set.
//!
//! A record survives iff it satisfies every enabled optional cut plus two
//! always-on predicates: targets flagged upstream as fully characterized are
//! excluded, and only fully observable transits are kept. Cheap string
//! predicates run before the numeric cuts. A disabled filter does not
//! evaluate its predicate at all; its thresholds may be absent.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};

use crate::error::{Result, ScraperError};
use crate::types::TransitRecord;

/// Followup-status phrases that mark a target as already fully
/// characterized; matched case-insensitively.
const FOLLOWUP_COMPLETE_PHRASES: [&str; 2] =
    ["no more observations needed", "no more sg1 observations needed"];

/// Partial-transit windows are not actionable: this exact value must appear
/// in the observability column.
const FULLY_OBSERVABLE: &str = "100%";

/// Per-filter toggles and thresholds, one sub-table per optional cut.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub start_time_window: StartTimeWindow,
    pub magnitude_ceiling: MagnitudeCeiling,
    pub depth_ceiling: DepthCeiling,
    pub radius_band: RadiusBand,
}

/// Keep records whose start time lies strictly inside (start, end).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StartTimeWindow {
    pub enabled: bool,
    #[serde(deserialize_with = "hhmm_option")]
    pub start: Option<NaiveTime>,
    #[serde(deserialize_with = "hhmm_option")]
    pub end: Option<NaiveTime>,
}

/// Keep records strictly dimmer than `max` (larger magnitude is dimmer).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MagnitudeCeiling {
    pub enabled: bool,
    pub max: Option<f64>,
}

/// Keep records with transit depth at most `max` parts per thousand.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DepthCeiling {
    pub enabled: bool,
    pub max: Option<f64>,
}

/// Keep records with planet radius inside the inclusive [min, max] band.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RadiusBand {
    pub enabled: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FilterConfig {
    /// Reject enabled filters with absent thresholds at load time, so
    /// filtering itself can never fail.
    pub fn validate(&self) -> Result<()> {
        let missing = |filter: &str, field: &str| {
            Err(ScraperError::Config(format!(
                "filter '{filter}' is enabled but '{field}' is not set"
            )))
        };

        let window = &self.start_time_window;
        if window.enabled && window.start.is_none() {
            return missing("start_time_window", "start");
        }
        if window.enabled && window.end.is_none() {
            return missing("start_time_window", "end");
        }
        if self.magnitude_ceiling.enabled && self.magnitude_ceiling.max.is_none() {
            return missing("magnitude_ceiling", "max");
        }
        if self.depth_ceiling.enabled && self.depth_ceiling.max.is_none() {
            return missing("depth_ceiling", "max");
        }
        if self.radius_band.enabled && self.radius_band.min.is_none() {
            return missing("radius_band", "min");
        }
        if self.radius_band.enabled && self.radius_band.max.is_none() {
            return missing("radius_band", "max");
        }
        Ok(())
    }

    fn retains(&self, record: &TransitRecord) -> bool {
        needs_more_observations(record)
            && fully_observable(record)
            && self.within_start_window(record)
            && self.dimmer_than_ceiling(record)
            && self.within_depth_ceiling(record)
            && self.within_radius_band(record)
    }

    fn within_start_window(&self, record: &TransitRecord) -> bool {
        let window = &self.start_time_window;
        if !window.enabled {
            return true;
        }
        let (Some(start), Some(end)) = (window.start, window.end) else {
            return true;
        };
        match NaiveTime::parse_from_str(&record.start_time, "%H:%M") {
            Ok(t) => t > start && t < end,
            Err(_) => false,
        }
    }

    fn dimmer_than_ceiling(&self, record: &TransitRecord) -> bool {
        let cut = &self.magnitude_ceiling;
        if !cut.enabled {
            return true;
        }
        // Strictly greater: the cut keeps dim targets.
        cut.max.map_or(true, |max| record.v_mag > max)
    }

    fn within_depth_ceiling(&self, record: &TransitRecord) -> bool {
        let cut = &self.depth_ceiling;
        if !cut.enabled {
            return true;
        }
        cut.max.map_or(true, |max| record.depth_ppt <= max)
    }

    fn within_radius_band(&self, record: &TransitRecord) -> bool {
        let band = &self.radius_band;
        if !band.enabled {
            return true;
        }
        band.min.map_or(true, |min| record.radius_re >= min)
            && band.max.map_or(true, |max| record.radius_re <= max)
    }
}

fn needs_more_observations(record: &TransitRecord) -> bool {
    let comments = record.comments.to_lowercase();
    !FOLLOWUP_COMPLETE_PHRASES
        .iter()
        .any(|phrase| comments.contains(phrase))
}

fn fully_observable(record: &TransitRecord) -> bool {
    record.percent_transit_observable == FULLY_OBSERVABLE
}

/// Apply the configured filter chain, preserving record order. The input is
/// never mutated; survivors are cloned out.
pub fn apply(records: &[TransitRecord], config: &FilterConfig) -> Vec<TransitRecord> {
    records
        .iter()
        .filter(|record| config.retains(record))
        .cloned()
        .collect()
}

fn hhmm_option<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| NaiveTime::parse_from_str(&s, "%H:%M").map_err(serde::de::Error::custom))
        .transpose()
}
