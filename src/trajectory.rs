use serde::Serialize;

use crate::{Error, GeoPoint, Result};

/// An ordered sequence of points; insertion order defines the path. Only
/// valid `GeoPoint`s can enter, so a trajectory can never contain an
/// out-of-range coordinate. Transform operations (simplify, subsample,
/// interpolate) return new trajectories and leave the original untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Trajectory {
    pub(crate) points: Vec<GeoPoint>,
}

/// Axis-aligned bounding box in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Midpoint of the box, which is not the centroid of the points.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

impl Trajectory {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Builds a trajectory from bare (latitude, longitude) pairs.
    pub fn from_coordinates(coordinates: &[(f64, f64)]) -> Result<Self> {
        let mut points = Vec::new();
        for (lat, lon) in coordinates {
            points.push(GeoPoint::new(*lat, *lon)?);
        }
        Ok(Self { points })
    }

    pub fn add_point(&mut self, point: GeoPoint) {
        self.points.push(point);
    }

    /// Inserting at `len` is an append; anything past that is an error.
    pub fn insert_point(&mut self, index: usize, point: GeoPoint) -> Result<()> {
        if index > self.points.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.points.len(),
            });
        }
        self.points.insert(index, point);
        Ok(())
    }

    pub fn remove_point(&mut self, index: usize) -> Result<GeoPoint> {
        if index >= self.points.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.points.len(),
            });
        }
        Ok(self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&GeoPoint> {
        self.points.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.points.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }

    /// A defensive copy, never a live view.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.points.clone()
    }

    /// (latitude, longitude) pairs in point order.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|pt| pt.lat_lon()).collect()
    }

    pub fn bounds(&self) -> Result<Bounds> {
        if self.points.is_empty() {
            return Err(Error::EmptyTrajectory);
        }
        let mut bounds = Bounds {
            min_lat: f64::MAX,
            min_lon: f64::MAX,
            max_lat: f64::MIN,
            max_lon: f64::MIN,
        };
        for pt in &self.points {
            bounds.min_lat = bounds.min_lat.min(pt.latitude);
            bounds.min_lon = bounds.min_lon.min(pt.longitude);
            bounds.max_lat = bounds.max_lat.max(pt.latitude);
            bounds.max_lon = bounds.max_lon.max(pt.longitude);
        }
        Ok(bounds)
    }

    /// (latitude, longitude) midpoint of the bounding box.
    pub fn center(&self) -> Result<(f64, f64)> {
        Ok(self.bounds()?.center())
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for Trajectory {
    type Item = GeoPoint;
    type IntoIter = std::vec::IntoIter<GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
