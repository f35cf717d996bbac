//! CSV export of a user's measurement history.
//!
//! Writes a fresh file each time; the CSV is a report of what is in the
//! store, not a second source of truth.

use crate::{Result, UserRecord};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    date: String,
    weight: Option<f64>,
    waist: Option<f64>,
    chest: Option<f64>,
    bicep: Option<f64>,
    thigh: Option<f64>,
    notes: &'a str,
}

/// Write the user's measurement log to `csv_path`.
///
/// The file is replaced, flushed, and fsynced before returning. Returns
/// the number of rows written (headers not counted).
pub fn export_measurements(user: &UserRecord, csv_path: &Path) -> Result<usize> {
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(csv_path)?;

    for measurement in &user.measurements {
        writer.serialize(CsvRow {
            date: measurement.date.to_string(),
            weight: measurement.weight,
            waist: measurement.waist,
            chest: measurement.chest,
            bicep: measurement.bicep,
            thigh: measurement.thigh,
            notes: &measurement.notes,
        })?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!(
        "Exported {} measurements for {} to {:?}",
        user.measurements.len(),
        user.email,
        csv_path
    );

    Ok(user.measurements.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Measurement;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn user_with_measurements(count: usize) -> UserRecord {
        let mut user = UserRecord::new("a@example.com", "pw", "Alice");
        for i in 0..count {
            user.measurements.push(Measurement {
                id: Uuid::new_v4(),
                date: NaiveDate::from_ymd_opt(2026, 1, 1 + i as u32).unwrap(),
                weight: Some(180.0 - i as f64),
                waist: Some(34.0),
                chest: None,
                bicep: None,
                thigh: None,
                notes: format!("entry {}", i),
            });
        }
        user
    }

    #[test]
    fn test_export_writes_all_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("measurements.csv");

        let user = user_with_measurements(3);
        let count = export_measurements(&user, &csv_path).unwrap();
        assert_eq!(count, 3);

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 3);
    }

    #[test]
    fn test_export_empty_log_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("measurements.csv");

        let user = user_with_measurements(0);
        let count = export_measurements(&user, &csv_path).unwrap();
        assert_eq!(count, 0);
        assert!(csv_path.exists());
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("measurements.csv");

        export_measurements(&user_with_measurements(5), &csv_path).unwrap();
        export_measurements(&user_with_measurements(2), &csv_path).unwrap();

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 2);
    }
}
