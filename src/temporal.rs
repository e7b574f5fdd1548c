//! Time-based analysis, built on the geometric metrics plus whatever
//! per-point timestamps are present.

use chrono::NaiveDateTime;

use crate::{haversine_distance, Trajectory};

/// Default endpoint separation, in meters, under which a path counts as a
/// closed loop.
pub const DEFAULT_CLOSED_THRESHOLD_M: f64 = 10.0;

impl Trajectory {
    /// Elapsed seconds between the earliest and latest timestamped points,
    /// or None with fewer than two of them.
    ///
    /// This takes the extreme timestamps, not the first and last point: when
    /// timestamps are not monotone in point order the result diverges from
    /// the traversal time. Kept that way on purpose.
    pub fn duration(&self) -> Option<f64> {
        let timestamps: Vec<NaiveDateTime> =
            self.points.iter().filter_map(|pt| pt.timestamp).collect();
        if timestamps.len() < 2 {
            return None;
        }
        let min = timestamps.iter().min().unwrap();
        let max = timestamps.iter().max().unwrap();
        Some((*max - *min).num_milliseconds() as f64 / 1000.0)
    }

    /// Average speed in meters per second; None without a positive duration.
    pub fn average_speed(&self) -> Option<f64> {
        let duration = self.duration()?;
        if duration == 0.0 {
            return None;
        }
        Some(self.length() / duration)
    }

    /// Whether the path returns to its start: at least 3 points, with the
    /// first and last within `threshold_m` meters of each other.
    pub fn is_closed(&self, threshold_m: f64) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        haversine_distance(&self.points[0], self.points.last().unwrap()) <= threshold_m
    }
}
