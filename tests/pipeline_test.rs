use anyhow::Result;

use transit_scraper::filter::{self, FilterConfig, MagnitudeCeiling};
use transit_scraper::{normalize, output, table};

const REPORT: &str = include_str!("fixtures/report.html");

#[test]
fn full_pipeline_from_report_page_to_csv() -> Result<()> {
    let rows = table::extract_rows(REPORT)?;
    assert_eq!(rows.len(), 5);

    // One row has a short name cell and is dropped as malformed; the rest
    // of the batch still normalizes.
    let batch = normalize::normalize(&rows)?;
    assert_eq!(batch.records.len(), 4);
    assert_eq!(batch.skipped.len(), 1);

    let names: Vec<&str> = batch
        .records
        .iter()
        .map(|r| r.object_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["TOI 1130.02", "TOI 130.01", "TOI 352.01", "TOI 554.01"]
    );

    // The blank radius cell normalizes to 0.0 instead of dropping the row.
    assert_eq!(batch.records[1].radius_re, 0.0);
    assert_eq!(batch.records[0].start_time, "22:41");
    assert_eq!(batch.records[0].end_time, "01:17");
    assert_eq!(batch.records[0].duration_uncertainty_hours, "0.05");
    assert_eq!(batch.records[0].percent_baseline_observable, "45%");

    // Always-on predicates: the SG1-complete target and the 95%-observable
    // target drop out even with every optional filter disabled.
    let curated = filter::apply(&batch.records, &FilterConfig::default());
    let curated_names: Vec<&str> = curated.iter().map(|r| r.object_name.as_str()).collect();
    assert_eq!(curated_names, vec!["TOI 1130.02", "TOI 130.01"]);

    // Adding the magnitude ceiling keeps only the dim target.
    let config = FilterConfig {
        magnitude_ceiling: MagnitudeCeiling {
            enabled: true,
            max: Some(10.0),
        },
        ..Default::default()
    };
    let dim_only = filter::apply(&batch.records, &config);
    assert_eq!(dim_only.len(), 1);
    assert_eq!(dim_only[0].object_name, "TOI 1130.02");

    let dir = tempfile::tempdir()?;
    let csv_path = dir.path().join("TESS_Targets-02-05-2025.csv");
    output::write_csv(&curated, &csv_path)?;

    let written = std::fs::read_to_string(&csv_path)?;
    let mut lines = written.lines();
    assert!(lines.next().unwrap().starts_with("Object Name,Vmag,"));
    assert_eq!(lines.count(), 2);

    Ok(())
}
