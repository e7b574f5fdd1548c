//! Thin, non-interactive CSV boundary: turns a reader of CSV text into the
//! tabular rows `Trajectory::from_table` consumes. No delimiter or encoding
//! sniffing; callers with exotic files normalize them first.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::Trajectory;

/// Reads CSV with a header row into a trajectory, naming which columns carry
/// the coordinates and, optionally, timestamp and altitude.
pub fn from_csv_reader<R: std::io::Read>(
    reader: R,
    lat_col: &str,
    lon_col: &str,
    time_col: Option<&str>,
    alt_col: Option<&str>,
) -> Result<Trajectory> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?.clone();
    for col in [lat_col, lon_col] {
        if !headers.iter().any(|h| h == col) {
            bail!("column {:?} not found in CSV header {:?}", col, headers);
        }
    }

    let mut rows: Vec<BTreeMap<String, String>> = Vec::new();
    for rec in reader.deserialize() {
        rows.push(rec?);
    }
    if rows.is_empty() {
        warn!("CSV input has a header but no data rows");
    }

    let trajectory = Trajectory::from_table(&rows, lat_col, lon_col, time_col, alt_col)?;
    info!("loaded {} points from CSV", trajectory.len());
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_points_with_timestamps() {
        let data = "\
name,lat,lon,time
a,0.0,0.0,2024-05-01 10:00:00
b,0.0,1.0,2024-05-01 10:10:00
";
        let trajectory =
            from_csv_reader(data.as_bytes(), "lat", "lon", Some("time"), None).unwrap();
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.duration(), Some(600.0));
        assert_eq!(trajectory.coordinates(), vec![(0.0, 0.0), (0.0, 1.0)]);
    }

    #[test]
    fn rejects_missing_columns() {
        let data = "lat,lon\n0.0,0.0\n";
        let err = from_csv_reader(data.as_bytes(), "latitude", "lon", None, None).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn bad_rows_abort_the_load() {
        let data = "lat,lon\n0.0,0.0\n95.0,0.0\n";
        assert!(from_csv_reader(data.as_bytes(), "lat", "lon", None, None).is_err());
    }
}
