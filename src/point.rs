use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{Error, Result};

/// A single validated position. Coordinates are degrees; a point outside
/// latitude [-90, 90] or longitude [-180, 180] can never be constructed.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeoPoint {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) timestamp: Option<NaiveDateTime>,
    pub(crate) altitude: Option<f64>,
    pub(crate) metadata: Option<BTreeMap<String, String>>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            timestamp: None,
            altitude: None,
            metadata: None,
        })
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Altitude in meters.
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Opaque string-keyed metadata; the engine never interprets it.
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    pub fn metadata(&self) -> Option<&BTreeMap<String, String>> {
        self.metadata.as_ref()
    }

    /// (latitude, longitude), the display order.
    pub fn lat_lon(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// (longitude, latitude), the x/y order planar geometry works in.
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}
