//! Great-circle distance math for proximity filtering.
//!
//! Distances are computed with the haversine formula on a spherical earth
//! of radius 6371 km. The computation is a pure function of two coordinate
//! pairs so it can run against any record store and be tested without one.

use crate::model::Coordinates;

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius applied when a proximity query does not specify one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Great-circle distance in kilometers between two points.
///
/// # Examples
///
/// ```rust
/// use sitewatch::{Coordinates, haversine_km};
///
/// let rome = Coordinates::new(41.9028, 12.4964)?;
/// let milan = Coordinates::new(45.4642, 9.19)?;
/// let distance = haversine_km(rome, milan);
/// assert!((475.0..480.0).contains(&distance));
/// # Ok::<(), sitewatch::ModelError>(())
/// ```
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let half_dlat = (lat_b - lat_a) / 2.0;
    let half_dlng = (b.longitude() - a.longitude()).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlng.sin().powi(2);
    // Rounding can push the root fractionally outside [-1, 1] near the
    // antipodal point, which would make asin return NaN.
    2.0 * EARTH_RADIUS_KM * h.sqrt().clamp(-1.0, 1.0).asin()
}

/// Proximity constraint: a reference point and a radius in kilometers.
///
/// The cutoff is strict: a record sitting exactly on the radius is out,
/// and a zero radius matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFilter {
    pub center: Coordinates,
    pub radius_km: f64,
}

impl GeoFilter {
    /// Build a filter around an already-validated coordinate pair. A
    /// missing radius falls back to [`DEFAULT_RADIUS_KM`].
    #[must_use]
    pub fn new(center: Coordinates, radius_km: impl Into<Option<f64>>) -> Self {
        Self {
            center,
            radius_km: radius_km.into().unwrap_or(DEFAULT_RADIUS_KM),
        }
    }

    /// Distance from the center, and whether the point is inside the radius.
    #[must_use]
    pub fn admit(&self, point: Coordinates) -> (bool, f64) {
        let distance_km = haversine_km(self.center, point);
        (distance_km < self.radius_km, distance_km)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn coords(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    #[test]
    fn test_known_distance_rome_to_milan() {
        let distance = haversine_km(coords(41.9028, 12.4964), coords(45.4642, 9.19));
        assert_relative_eq!(distance, 477.0, max_relative = 0.01);
    }

    #[test]
    fn test_zero_distance() {
        let point = coords(41.9, 12.5);
        assert_eq!(haversine_km(point, point), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = coords(51.5074, -0.1278);
        let b = coords(-33.8688, 151.2093);
        assert_relative_eq!(haversine_km(a, b), haversine_km(b, a));
    }

    #[test]
    fn test_antipodal_points_do_not_produce_nan() {
        let distance = haversine_km(coords(0.0, 0.0), coords(0.0, 180.0));
        assert!(distance.is_finite());
        // Half the spherical circumference.
        assert_relative_eq!(
            distance,
            std::f64::consts::PI * EARTH_RADIUS_KM,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_default_radius() {
        let filter = GeoFilter::new(coords(41.9, 12.5), None);
        assert_eq!(filter.radius_km, DEFAULT_RADIUS_KM);
        let filter = GeoFilter::new(coords(41.9, 12.5), 2.5);
        assert_eq!(filter.radius_km, 2.5);
    }

    #[test]
    fn test_strict_cutoff() {
        let center = coords(41.9, 12.5);
        // Zero radius excludes even the center itself.
        let (inside, distance) = GeoFilter::new(center, 0.0).admit(center);
        assert!(!inside);
        assert_eq!(distance, 0.0);

        let (inside, _) = GeoFilter::new(center, 0.1).admit(center);
        assert!(inside);
    }
}
