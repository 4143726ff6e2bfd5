use std::env;
use tracing::{debug, info};

use crate::config::QueryConfig;
use crate::error::Result;

/// Environment variables carrying the report's HTTP basic auth credentials.
const USERNAME_VAR: &str = "TTF_USERNAME";
const PASSWORD_VAR: &str = "TTF_PASSWORD";

/// Thin client for the upstream transit-finder report endpoint.
pub struct ReportClient {
    client: reqwest::Client,
    query: QueryConfig,
}

impl ReportClient {
    pub fn new(query: QueryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            query,
        }
    }

    /// Fetch the rendered report page for the configured night.
    pub async fn fetch_report(&self) -> Result<String> {
        info!("fetching transit report for {}", self.query.date);

        let params = query_params(&self.query);
        let mut request = self.client.get(&self.query.base_url).query(&params);

        match (env::var(USERNAME_VAR), env::var(PASSWORD_VAR)) {
            (Ok(user), Ok(password)) => {
                request = request.basic_auth(user, Some(password));
            }
            _ => debug!("{USERNAME_VAR}/{PASSWORD_VAR} not set, requesting unauthenticated"),
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// The full parameter set the report endpoint expects. Single-target and
/// field-of-view selectors are always sent blank: this client only pulls the
/// whole nightly candidate table.
fn query_params(query: &QueryConfig) -> Vec<(&'static str, String)> {
    let observatory_string = format!(
        "{};{};{};{};{}",
        query.latitude,
        query.longitude,
        query.observatory_timezone,
        query.observatory_name,
        query.observatory_name
    );

    vec![
        ("observatory_string", observatory_string),
        ("use_utc", "1".to_string()),
        ("observatory_latitude", query.latitude.to_string()),
        ("observatory_longitude", query.longitude.to_string()),
        ("timezone", "UTC".to_string()),
        ("start_date", query.date.clone()),
        ("days_to_print", query.days_to_print.to_string()),
        ("days_in_past", query.days_in_past.to_string()),
        (
            "minimum_start_elevation",
            query.minimum_start_elevation.to_string(),
        ),
        ("and_vs_or", query.elevation_combinator.clone()),
        (
            "minimum_end_elevation",
            query.minimum_end_elevation.to_string(),
        ),
        ("minimum_ha", query.minimum_ha.to_string()),
        ("maximum_ha", query.maximum_ha.to_string()),
        ("baseline_hrs", query.baseline_hrs.to_string()),
        ("maximum_priority", query.maximum_priority.to_string()),
        ("minimum_depth", query.minimum_depth.to_string()),
        ("maximum_V_mag", String::new()),
        ("target_string", String::new()),
        ("lco_only", "0".to_string()),
        ("single_object", "0".to_string()),
        ("ra", String::new()),
        ("dec", String::new()),
        ("epoch", String::new()),
        ("period", String::new()),
        ("duration", String::new()),
        ("target", String::new()),
        ("show_ephemeris", "0".to_string()),
        ("print_html", "1".to_string()),
        ("twilight", query.twilight.to_string()),
        ("max_airmass", query.max_airmass.to_string()),
        ("fovWidth", String::new()),
        ("fovHeight", String::new()),
        ("fovPA", String::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_carry_the_configured_night() {
        let query = QueryConfig {
            date: "02-05-2025".to_string(),
            ..Default::default()
        };

        let params = query_params(&query);
        let lookup = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(lookup("start_date"), Some("02-05-2025"));
        assert_eq!(lookup("print_html"), Some("1"));
        assert_eq!(
            lookup("observatory_string"),
            Some("33.3558;-116.865;America/Los_Angeles;Palomar Observatory;Palomar Observatory")
        );
    }
}
