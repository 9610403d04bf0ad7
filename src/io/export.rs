//! Export report rows to CSV.
//!
//! Same columns as the terminal table; days without data are left empty.

use std::path::Path;

use crate::domain::ReportRow;
use crate::error::{AppError, EXIT_USAGE};
use crate::report::ROW_HEADERS;

/// Write report rows to a CSV file, replacing any existing file.
pub fn write_rows_csv(path: &Path, rows: &[ReportRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(ROW_HEADERS)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV header: {e}")))?;

    for r in rows {
        let mut record = vec![
            r.station_code.clone(),
            r.generator_code.clone(),
            r.station_type.display_name().to_string(),
        ];
        record.extend(r.days.iter().map(|d| d.map(|v| v.to_string()).unwrap_or_default()));
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationType;

    #[test]
    fn rows_are_written_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("energy.csv");
        let rows = vec![ReportRow {
            station_code: "DDSF".to_string(),
            generator_code: "DDSF1".to_string(),
            station_type: StationType::Solar,
            days: [Some(10), Some(11), None, None, None, None, None],
        }];

        write_rows_csv(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Station Code,Gen Code,Gen Type,Day1,Day2,Day3,Day4,Day5,Day6,Day7");
        assert_eq!(lines[1], "DDSF,DDSF1,solar farm,10,11,,,,,");
        assert_eq!(lines.len(), 2);
    }
}
