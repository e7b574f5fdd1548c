//! Stateless geometric algorithms over one or two trajectories. Everything
//! here is pure and synchronous; transforms return new trajectories.

use crate::{Error, GeoPoint, Result, Trajectory};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of arc at the equator. Used to scale planar degree
/// distances to meters; see `Trajectory::hausdorff_distance` for the caveats.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Great-circle distance between two points in meters, on a sphere of radius
/// `EARTH_RADIUS_M`. Symmetric, and zero exactly when the coordinates
/// coincide.
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

impl Trajectory {
    /// Total path length in meters: the sum of consecutive great-circle
    /// distances. 0.0 with fewer than two points.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_distance(&pair[0], &pair[1]))
            .sum()
    }

    /// Symmetric Hausdorff distance to another trajectory, in meters.
    ///
    /// Both paths are treated as planar polylines with (lon, lat) as x/y, and
    /// the degree-space result is scaled by `METERS_PER_DEGREE`. This is a
    /// deliberate small-scale approximation: away from the equator or over
    /// long spans it is measurably wrong, and callers needing geodetic
    /// accuracy must not rely on it there.
    pub fn hausdorff_distance(&self, other: &Trajectory) -> Result<f64> {
        if self.points.is_empty() || other.points.is_empty() {
            return Err(Error::EmptyTrajectory);
        }
        let forward = directed_hausdorff(&self.points, &other.points);
        let backward = directed_hausdorff(&other.points, &self.points);
        Ok(forward.max(backward) * METERS_PER_DEGREE)
    }

    /// Douglas-Peucker simplification with `tolerance` in degrees, applied in
    /// planar (lon, lat) space. Trajectories with fewer than 3 points come
    /// back as a plain copy. The first and last vertices are always kept.
    /// Each surviving vertex recovers timestamp and altitude from the
    /// original point nearest to it in planar distance, the earliest one
    /// winning ties; metadata is not carried over.
    pub fn simplify(&self, tolerance: f64) -> Trajectory {
        if self.points.len() < 3 {
            return self.clone();
        }

        let last = self.points.len() - 1;
        let mut keep = vec![false; self.points.len()];
        keep[0] = true;
        keep[last] = true;
        douglas_peucker(&self.points, 0, last, tolerance, &mut keep);

        let mut points = Vec::new();
        for (idx, kept) in keep.iter().enumerate() {
            if !kept {
                continue;
            }
            let vertex = &self.points[idx];
            let closest = closest_original(&self.points, vertex.lon_lat());
            points.push(GeoPoint {
                latitude: vertex.latitude,
                longitude: vertex.longitude,
                timestamp: closest.timestamp,
                altitude: closest.altitude,
                metadata: None,
            });
        }
        Trajectory { points }
    }

    /// Keeps every `step`-th point starting from the first, preserving all
    /// fields and order. `step == 1` is the identity.
    pub fn subsample(&self, step: usize) -> Result<Trajectory> {
        if step < 1 {
            return Err(Error::InvalidArgument(format!(
                "subsample step must be >= 1, got {}",
                step
            )));
        }
        Ok(Trajectory {
            points: self.points.iter().step_by(step).cloned().collect(),
        })
    }

    /// Resamples to approximately `num_points` points. Downsampling (a target
    /// at most the current count) delegates to `subsample` with an integer
    /// step, so the exact count is approximated, not guaranteed. Upsampling
    /// places points at evenly spaced fractions of total planar arc length;
    /// those points carry fresh coordinates and nothing else.
    pub fn interpolate(&self, num_points: usize) -> Result<Trajectory> {
        if num_points < 1 {
            return Err(Error::InvalidArgument(format!(
                "interpolate needs at least 1 point, got {}",
                num_points
            )));
        }
        if num_points <= self.points.len() {
            return self.subsample(self.points.len() / num_points);
        }
        if self.points.len() < 2 {
            return Err(Error::EmptyTrajectory);
        }

        // Cumulative planar arc length at each vertex
        let mut cumulative = vec![0.0];
        for pair in self.points.windows(2) {
            let d = planar_distance(pair[0].lon_lat(), pair[1].lon_lat());
            cumulative.push(cumulative.last().unwrap() + d);
        }
        let total = *cumulative.last().unwrap();

        let mut points = Vec::with_capacity(num_points);
        for i in 0..num_points {
            let target = total * (i as f64) / ((num_points - 1) as f64);
            points.push(point_along(&self.points, &cumulative, target));
        }
        Ok(Trajectory { points })
    }
}

fn planar_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Distance from `p` to the segment `a`-`b`, all in planar degree space.
fn point_segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return planar_distance(p, a);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    planar_distance(p, (a.0 + t * dx, a.1 + t * dy))
}

/// Max over vertices of `from` of the planar distance to the polyline `to`.
/// A single-point `to` degenerates to point-to-point distance.
fn directed_hausdorff(from: &[GeoPoint], to: &[GeoPoint]) -> f64 {
    let mut worst = 0.0_f64;
    for pt in from {
        let p = pt.lon_lat();
        let nearest = if to.len() == 1 {
            planar_distance(p, to[0].lon_lat())
        } else {
            to.windows(2)
                .map(|pair| point_segment_distance(p, pair[0].lon_lat(), pair[1].lon_lat()))
                .fold(f64::MAX, f64::min)
        };
        worst = worst.max(nearest);
    }
    worst
}

fn douglas_peucker(
    points: &[GeoPoint],
    first: usize,
    last: usize,
    tolerance: f64,
    keep: &mut [bool],
) {
    if last <= first + 1 {
        return;
    }
    let a = points[first].lon_lat();
    let b = points[last].lon_lat();
    let mut max_dist = 0.0;
    let mut max_idx = first;
    for idx in first + 1..last {
        let d = point_segment_distance(points[idx].lon_lat(), a, b);
        if d > max_dist {
            max_dist = d;
            max_idx = idx;
        }
    }
    if max_dist > tolerance {
        keep[max_idx] = true;
        douglas_peucker(points, first, max_idx, tolerance, keep);
        douglas_peucker(points, max_idx, last, tolerance, keep);
    }
}

/// The original point nearest to `vertex` by squared planar distance; strict
/// comparison keeps the earliest on ties.
fn closest_original<'a>(points: &'a [GeoPoint], vertex: (f64, f64)) -> &'a GeoPoint {
    let mut best = &points[0];
    let mut best_dist = f64::MAX;
    for pt in points {
        let (lon, lat) = pt.lon_lat();
        let d = (lon - vertex.0).powi(2) + (lat - vertex.1).powi(2);
        if d < best_dist {
            best = pt;
            best_dist = d;
        }
    }
    best
}

/// The point at planar arc length `target` along the polyline, given the
/// cumulative length at each vertex.
fn point_along(points: &[GeoPoint], cumulative: &[f64], target: f64) -> GeoPoint {
    let mut idx = 0;
    while idx + 2 < cumulative.len() && cumulative[idx + 1] < target {
        idx += 1;
    }
    let seg_len = cumulative[idx + 1] - cumulative[idx];
    let t = if seg_len == 0.0 {
        0.0
    } else {
        ((target - cumulative[idx]) / seg_len).clamp(0.0, 1.0)
    };
    let (lon1, lat1) = points[idx].lon_lat();
    let (lon2, lat2) = points[idx + 1].lon_lat();
    GeoPoint {
        latitude: lat1 + t * (lat2 - lat1),
        longitude: lon1 + t * (lon2 - lon1),
        timestamp: None,
        altitude: None,
        metadata: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    fn timestamp(hour: u32, minute: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn haversine_basics() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(0.0, 1.0).unwrap();
        assert_eq!(haversine_distance(&a, &a), 0.0);
        assert_eq!(haversine_distance(&a, &b), haversine_distance(&b, &a));
        // One degree of longitude at the equator
        assert!((haversine_distance(&a, &b) - 111_194.9).abs() < 1.0);
    }

    #[test]
    fn length_of_equator_trajectory() {
        let trajectory =
            Trajectory::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]).unwrap();
        assert!((trajectory.length() - 222_389.8).abs() < 1.0);
    }

    #[test]
    fn length_needs_two_points() {
        assert_eq!(Trajectory::new().length(), 0.0);
        let single = Trajectory::from_coordinates(&[(10.0, 20.0)]).unwrap();
        assert_eq!(single.length(), 0.0);
    }

    #[test]
    fn subsample_identity_and_step() {
        let mut metadata = BTreeMap::new();
        metadata.insert("k".to_string(), "v".to_string());
        let points = vec![
            GeoPoint::new(0.0, 0.0)
                .unwrap()
                .with_timestamp(timestamp(10, 0))
                .with_metadata(metadata),
            GeoPoint::new(0.0, 1.0).unwrap(),
            GeoPoint::new(0.0, 2.0).unwrap(),
            GeoPoint::new(0.0, 3.0).unwrap(),
            GeoPoint::new(0.0, 4.0).unwrap(),
        ];
        let trajectory = Trajectory::from_points(points);

        // step 1 is the identity, metadata included
        assert_eq!(trajectory.subsample(1).unwrap(), trajectory);

        let every_other = trajectory.subsample(2).unwrap();
        assert_eq!(
            every_other.coordinates(),
            vec![(0.0, 0.0), (0.0, 2.0), (0.0, 4.0)]
        );
        assert!(every_other.get(0).unwrap().metadata().is_some());

        assert!(matches!(
            trajectory.subsample(0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn simplify_removes_collinear_points() {
        let points = vec![
            GeoPoint::new(0.0, 0.0).unwrap().with_timestamp(timestamp(10, 0)),
            GeoPoint::new(0.0, 1.0).unwrap().with_timestamp(timestamp(10, 5)),
            GeoPoint::new(0.0, 2.0).unwrap().with_timestamp(timestamp(10, 10)),
        ];
        let trajectory = Trajectory::from_points(points);

        let simplified = trajectory.simplify(0.0);
        assert_eq!(simplified.coordinates(), vec![(0.0, 0.0), (0.0, 2.0)]);
        // Timestamps recovered from the matching originals
        assert_eq!(simplified.get(0).unwrap().timestamp(), Some(timestamp(10, 0)));
        assert_eq!(simplified.get(1).unwrap().timestamp(), Some(timestamp(10, 10)));
    }

    #[test]
    fn simplify_keeps_deviating_points() {
        let trajectory =
            Trajectory::from_coordinates(&[(0.0, 0.0), (1.0, 1.0), (0.0, 2.0)]).unwrap();
        // The middle point sits a degree off the endpoint chord
        let simplified = trajectory.simplify(0.1);
        assert_eq!(simplified.len(), 3);

        let flattened = trajectory.simplify(2.0);
        assert_eq!(flattened.coordinates(), vec![(0.0, 0.0), (0.0, 2.0)]);
    }

    #[test]
    fn simplify_preserves_endpoints_and_never_grows() {
        let trajectory = Trajectory::from_coordinates(&[
            (0.0, 0.0),
            (0.1, 1.0),
            (-0.05, 2.0),
            (0.2, 3.0),
            (0.0, 4.0),
        ])
        .unwrap();
        for tolerance in [0.0, 0.01, 0.5, 10.0] {
            let simplified = trajectory.simplify(tolerance);
            assert!(simplified.len() <= trajectory.len());
            assert_eq!(simplified.get(0).unwrap().lat_lon(), (0.0, 0.0));
            assert_eq!(
                simplified.get(simplified.len() - 1).unwrap().lat_lon(),
                (0.0, 4.0)
            );
        }
    }

    #[test]
    fn simplify_copies_short_trajectories() {
        let two = Trajectory::from_coordinates(&[(0.0, 0.0), (0.0, 1.0)]).unwrap();
        assert_eq!(two.simplify(0.5), two);
        assert_eq!(Trajectory::new().simplify(0.5), Trajectory::new());
    }

    #[test]
    fn interpolate_upsamples_by_arc_length() {
        let trajectory = Trajectory::from_coordinates(&[(0.0, 0.0), (0.0, 4.0)]).unwrap();
        let resampled = trajectory.interpolate(5).unwrap();
        assert_eq!(
            resampled.coordinates(),
            vec![(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (0.0, 3.0), (0.0, 4.0)]
        );
        // Upsampled points carry no timestamp or altitude
        assert_eq!(resampled.get(2).unwrap().timestamp(), None);
        assert_eq!(resampled.get(2).unwrap().altitude(), None);
    }

    #[test]
    fn interpolate_downsamples_via_subsample() {
        let coords: Vec<(f64, f64)> = (0..10).map(|i| (0.0, i as f64)).collect();
        let trajectory = Trajectory::from_coordinates(&coords).unwrap();
        let reduced = trajectory.interpolate(5).unwrap();
        // 10 / 5 = step 2
        assert_eq!(
            reduced.coordinates(),
            vec![(0.0, 0.0), (0.0, 2.0), (0.0, 4.0), (0.0, 6.0), (0.0, 8.0)]
        );
    }

    #[test]
    fn interpolate_rejects_bad_input() {
        let trajectory = Trajectory::from_coordinates(&[(0.0, 0.0), (0.0, 4.0)]).unwrap();
        assert!(matches!(
            trajectory.interpolate(0),
            Err(Error::InvalidArgument(_))
        ));
        let single = Trajectory::from_coordinates(&[(0.0, 0.0)]).unwrap();
        assert_eq!(single.interpolate(5), Err(Error::EmptyTrajectory));
    }

    #[test]
    fn hausdorff_identical_is_zero() {
        let trajectory =
            Trajectory::from_coordinates(&[(0.0, 0.0), (0.5, 1.0), (0.0, 2.0)]).unwrap();
        assert_eq!(trajectory.hausdorff_distance(&trajectory).unwrap(), 0.0);
    }

    #[test]
    fn hausdorff_parallel_segments() {
        let a = Trajectory::from_coordinates(&[(0.0, 0.0), (0.0, 1.0)]).unwrap();
        let b = Trajectory::from_coordinates(&[(1.0, 0.0), (1.0, 1.0)]).unwrap();
        // One degree of separation, scaled to meters
        let d = a.hausdorff_distance(&b).unwrap();
        assert!((d - METERS_PER_DEGREE).abs() < 1e-6);
        assert_eq!(d, b.hausdorff_distance(&a).unwrap());
    }

    #[test]
    fn hausdorff_rejects_empty() {
        let trajectory = Trajectory::from_coordinates(&[(0.0, 0.0), (0.0, 1.0)]).unwrap();
        assert_eq!(
            trajectory.hausdorff_distance(&Trajectory::new()),
            Err(Error::EmptyTrajectory)
        );
        assert_eq!(
            Trajectory::new().hausdorff_distance(&trajectory),
            Err(Error::EmptyTrajectory)
        );
    }

    #[test]
    fn transforms_do_not_mutate_the_original() {
        let trajectory = Trajectory::from_coordinates(&[
            (0.0, 0.0),
            (0.0, 1.0),
            (0.0, 2.0),
            (0.0, 3.0),
        ])
        .unwrap();
        let before = trajectory.clone();
        let _ = trajectory.simplify(0.5);
        let _ = trajectory.subsample(2).unwrap();
        let _ = trajectory.interpolate(9).unwrap();
        assert_eq!(trajectory, before);
    }
}
