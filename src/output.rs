use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::types::TransitRecord;

/// Write the curated record set as CSV.
///
/// Headers and column order come from the serde renames on
/// [`TransitRecord`]; they are a compatibility contract with downstream
/// consumers of the target list.
pub fn write_csv(records: &[TransitRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> TransitRecord {
        TransitRecord {
            object_name: "TOI 1130.02".to_string(),
            v_mag: 10.5,
            period_days: 3.795,
            depth_ppt: 5.4,
            radius_re: 3.56,
            evening_date: "Wednesday 2025-02-05".to_string(),
            start_time: "22:41".to_string(),
            mid_time: "23:59".to_string(),
            end_time: "01:17".to_string(),
            duration_hours: "2.60".to_string(),
            duration_uncertainty_hours: "0.05".to_string(),
            percent_transit_observable: "100%".to_string(),
            percent_baseline_observable: "45%".to_string(),
            comments: "Deep transit, good candidate".to_string(),
        }
    }

    #[test]
    fn csv_header_matches_the_output_contract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.csv");

        write_csv(&[sample_record()], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Object Name,Vmag,Period (days),Depth (ppt),Radius (Re),Local Evening Date,\
             Start Time (UTC),Mid Time (UTC),End Time (UTC),Duration (hours),\
             Uncert. Duration (hours),Percent Trans Obs.,Percent Base Obs.,Comments"
        );
        // The comment contains a comma, so the field must be quoted.
        assert!(lines.next().unwrap().contains("\"Deep transit, good candidate\""));
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/targets.csv");

        write_csv(&[sample_record()], &path).unwrap();
        assert!(path.exists());
    }
}
