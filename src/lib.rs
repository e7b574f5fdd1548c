//! A trajectory analysis engine: an ordered sequence of validated geographic
//! points, with metric computation (length, speed, closure detection),
//! simplification/resampling, shape comparison, and projections into tabular
//! and vector-geometry interchange forms.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod error;
mod export;
mod geometry;
mod import;
mod point;
mod table;
mod temporal;
mod trajectory;

pub use self::error::{Error, Result};
pub use self::export::KmlWriter;
pub use self::geometry::{haversine_distance, EARTH_RADIUS_M, METERS_PER_DEGREE};
pub use self::import::from_csv_reader;
pub use self::point::GeoPoint;
pub use self::table::PointRecord;
pub use self::temporal::DEFAULT_CLOSED_THRESHOLD_M;
pub use self::trajectory::{Bounds, Trajectory};
