use serde::{Deserialize, Serialize};

use super::ModelError;

/// Scale for the fixed-point representation: 1e-8 degree per unit.
const SCALE: f64 = 1e8;

/// A latitude/longitude pair with fixed 8-decimal-digit precision.
///
/// Coordinates are stored as scaled integers so the declared precision
/// survives storage and serialization exactly, with no float drift. Values
/// are rounded to 8 decimal places on construction; latitude must lie in
/// [-90, 90] and longitude in [-180, 180].
///
/// # Examples
///
/// ```rust
/// use sitewatch::Coordinates;
///
/// let rome = Coordinates::new(41.902782, 12.496366)?;
/// assert_eq!(rome.latitude(), 41.902782);
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, -180.5).is_err());
/// # Ok::<(), sitewatch::ModelError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Degrees", into = "Degrees")]
pub struct Coordinates {
    lat_e8: i64,
    lng_e8: i64,
}

impl Coordinates {
    /// Build a coordinate pair from decimal degrees.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LatitudeOutOfRange`] or
    /// [`ModelError::LongitudeOutOfRange`] when a component is non-finite or
    /// outside its valid range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ModelError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ModelError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ModelError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            lat_e8: (latitude * SCALE).round() as i64,
            lng_e8: (longitude * SCALE).round() as i64,
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn latitude(self) -> f64 {
        self.lat_e8 as f64 / SCALE
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn longitude(self) -> f64 {
        self.lng_e8 as f64 / SCALE
    }
}

/// Serde shadow of [`Coordinates`] in plain decimal degrees.
#[derive(Serialize, Deserialize)]
struct Degrees {
    latitude: f64,
    longitude: f64,
}

impl From<Coordinates> for Degrees {
    fn from(coords: Coordinates) -> Self {
        Self {
            latitude: coords.latitude(),
            longitude: coords.longitude(),
        }
    }
}

impl TryFrom<Degrees> for Coordinates {
    type Error = ModelError;

    fn try_from(degrees: Degrees) -> Result<Self, Self::Error> {
        Self::new(degrees.latitude, degrees.longitude)
    }
}
