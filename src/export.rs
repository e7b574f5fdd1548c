//! Projections into vector-geometry interchange forms. The engine builds the
//! structures; serialization collaborators own the file formats.

use std::path::Path;

use anyhow::Result;
use geojson::Feature;

use crate::Trajectory;

/// Collaborator owning KML document construction and file writing. The
/// engine's contract ends at handing over a name, a description, and the
/// ordered (lon, lat) coordinates; I/O and encoding failures propagate
/// unchanged.
pub trait KmlWriter {
    fn write_kml(
        &self,
        path: &Path,
        name: &str,
        description: &str,
        coordinates: &[(f64, f64)],
    ) -> Result<()>;
}

impl Trajectory {
    /// The canonical vector-geometry handoff: one open (lon, lat) polyline,
    /// single part, no holes.
    pub fn line_coordinates(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|pt| pt.lon_lat()).collect()
    }

    /// A GeoJSON Feature with a LineString geometry and summary properties
    /// (length, num_points, duration).
    pub fn to_geojson(&self) -> Feature {
        let coordinates = self
            .points
            .iter()
            .map(|pt| {
                let (lon, lat) = pt.lon_lat();
                vec![lon, lat]
            })
            .collect();

        let mut feature = Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::LineString(
                coordinates,
            ))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("length", self.length());
        feature.set_property("num_points", self.len());
        feature.set_property("duration", self.duration());
        feature
    }

    pub fn write_geojson(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(&self.to_geojson())?)?;
        info!("wrote {} points to {}", self.len(), path.display());
        Ok(())
    }

    /// Exports one named placemark through a KML collaborator; see
    /// `KmlWriter`.
    pub fn to_kml<W: KmlWriter>(
        &self,
        writer: &W,
        path: &Path,
        name: &str,
        description: &str,
    ) -> Result<()> {
        writer.write_kml(path, name, description, &self.line_coordinates())
    }
}
