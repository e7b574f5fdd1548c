//! The tabular projection of a trajectory, and construction from a tabular
//! row source such as a CSV import collaborator.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error, GeoPoint, Result, Trajectory};

/// One row per point; the interchange shape shared with tabular
/// collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: Option<NaiveDateTime>,
    pub altitude: Option<f64>,
}

/// Timestamp formats accepted from tabular sources. The space-separated form
/// is what AVL-style exports use; the T form covers ISO-8601 dumps.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

impl Trajectory {
    /// One row per point, in point order.
    pub fn to_table(&self) -> Vec<PointRecord> {
        self.points
            .iter()
            .map(|pt| PointRecord {
                latitude: pt.latitude,
                longitude: pt.longitude,
                timestamp: pt.timestamp,
                altitude: pt.altitude,
            })
            .collect()
    }

    /// Builds a trajectory from string-keyed rows, naming which columns to
    /// read. Timestamp and altitude lookups are skipped when the column name
    /// isn't given, isn't present in a row, or the cell is empty. Any bad
    /// cell or out-of-range coordinate aborts the whole construction with
    /// `Error::InvalidRow`; no partial trajectory is ever returned.
    pub fn from_table(
        rows: &[BTreeMap<String, String>],
        lat_col: &str,
        lon_col: &str,
        time_col: Option<&str>,
        alt_col: Option<&str>,
    ) -> Result<Trajectory> {
        let mut points = Vec::new();
        for (row, cells) in rows.iter().enumerate() {
            let point = point_from_row(cells, lat_col, lon_col, time_col, alt_col)
                .map_err(|err| Error::InvalidRow {
                    row,
                    source: Box::new(err),
                })?;
            points.push(point);
        }
        Ok(Trajectory::from_points(points))
    }
}

fn point_from_row(
    cells: &BTreeMap<String, String>,
    lat_col: &str,
    lon_col: &str,
    time_col: Option<&str>,
    alt_col: Option<&str>,
) -> Result<GeoPoint> {
    let latitude = parse_float(cells, lat_col)?;
    let longitude = parse_float(cells, lon_col)?;
    let mut point = GeoPoint::new(latitude, longitude)?;

    if let Some(value) = optional_cell(cells, time_col) {
        point = point.with_timestamp(parse_timestamp(value)?);
    }
    if let Some(value) = optional_cell(cells, alt_col) {
        let altitude = value.trim().parse().map_err(|_| {
            Error::InvalidArgument(format!("altitude {:?} is not a number", value))
        })?;
        point = point.with_altitude(altitude);
    }
    Ok(point)
}

/// An empty cell counts as absent; CSV exports encode missing values that way.
fn optional_cell<'a>(cells: &'a BTreeMap<String, String>, col: Option<&str>) -> Option<&'a str> {
    let value = cells.get(col?)?;
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_float(cells: &BTreeMap<String, String>, col: &str) -> Result<f64> {
    let value = cells
        .get(col)
        .ok_or_else(|| Error::InvalidArgument(format!("missing column {:?}", col)))?;
    value.trim().parse().map_err(|_| {
        Error::InvalidArgument(format!("column {:?} value {:?} is not a number", col, value))
    })
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value.trim(), format) {
            return Ok(parsed);
        }
    }
    Err(Error::InvalidArgument(format!(
        "cannot parse timestamp {:?}",
        value
    )))
}
