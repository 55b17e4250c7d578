//! Conversions between local North-East-Down offsets and geodetic latitude/longitude/altitude.
//!
//! All conversions go through Earth-Centered, Earth-Fixed (ECEF) coordinates on the [WGS84]
//! ellipsoid: the anchor is placed in ECEF, the local offset is rotated from the tangent plane at
//! the anchor into ECEF, and the sum is turned back into geodetic coordinates. That makes
//! [`ned_to_geodetic`] and [`geodetic_to_ned`] exact inverses of each other up to floating point
//! error, but the further a point is from the anchor the less "north" and "down" mean what you'd
//! expect them to, since the tangent plane does not follow the curvature of the earth.
//!
//! [WGS84]: https://en.wikipedia.org/wiki/World_Geodetic_System#WGS_84

use crate::util::BoundedAngle;
use crate::{Matrix3, Vector3};
use std::fmt;
use std::fmt::Display;
use uom::si::f64::{Angle, Length};
use uom::si::{
    angle::{degree, radian},
    length::meter,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Parameters required for WGS84 ellipsoid
// https://nsgreg.nga.mil/doc/view?i=4085 table 3.1
#[doc(alias = "equatorial radius")]
#[doc(alias = "a")]
pub(crate) const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
#[doc(alias = "1/f")]
const FLATTENING_FACTOR: f64 = 298.257_223_563;
#[doc(alias = "f")]
const FLATTENING: f64 = 1.0 / FLATTENING_FACTOR;
#[doc(alias = "e^2")]
// e^2 = 1 - b^2/a^2 with b = a * (1 - f)
//     = 2 * f - f^2
const ECCENTRICITY_SQ: f64 = 2.0 * FLATTENING - FLATTENING * FLATTENING;

/// Upper bound on the latitude refinement steps in [`Wgs84::from_ecef`].
///
/// Each step shrinks the error by roughly a factor of e² (~1/150) for points near the surface, so
/// this is far more than we ever need.
const MAX_LATITUDE_ITERATIONS: usize = 16;

/// An Earth-bound location on the [World Geodetic System
/// '84](https://en.wikipedia.org/wiki/World_Geodetic_System#WGS_84) ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wgs84 {
    latitude: Angle,
    longitude: Angle,
    altitude: Length,
}

impl Wgs84 {
    /// Constructs a world location from latitude, longitude, and altitude.
    ///
    /// The altitude is measured as distance above the WGS84 datum reference ellipsoid.
    #[must_use]
    pub fn new(
        latitude: impl Into<Angle>,
        longitude: impl Into<Angle>,
        altitude: impl Into<Length>,
    ) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            altitude: altitude.into(),
        }
    }

    /// Constructs a world location from latitude and longitude in degrees and altitude in meters.
    #[must_use]
    pub fn from_degrees_and_meters(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self::new(
            Angle::new::<degree>(latitude),
            Angle::new::<degree>(longitude),
            Length::new::<meter>(altitude),
        )
    }

    /// Returns `(latitude, longitude, altitude)` in degrees, degrees, and meters.
    #[must_use]
    pub fn to_degrees_and_meters(&self) -> (f64, f64, f64) {
        (
            self.latitude.get::<degree>(),
            self.longitude.get::<degree>(),
            self.altitude.get::<meter>(),
        )
    }

    /// Returns the angle north of the equator as it was given.
    #[must_use]
    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    /// Returns the angle east of the IERS Reference Meridian, in [-180°, 180°).
    #[must_use]
    pub fn longitude(&self) -> Angle {
        Angle::new::<radian>(BoundedAngle::new(self.longitude).to_signed_range())
    }

    /// Returns the distance above the WGS84 ellipsoid.
    #[must_use]
    pub fn altitude(&self) -> Length {
        self.altitude
    }

    /// Computes the [great-circle distance] between the two locations on the surface of the
    /// earth, ignoring altitude.
    ///
    /// This treats the earth as a sphere with the WGS84 equatorial radius, so it is an
    /// approximation.
    ///
    /// [great-circle distance]: https://en.wikipedia.org/wiki/Great-circle_distance
    #[doc(alias = "great_circle_distance")]
    #[must_use]
    pub fn haversine_distance_on_surface(&self, other: &Wgs84) -> Length {
        let haversine = central_angle_by_inverse_haversine(
            self.latitude,
            other.latitude,
            self.longitude,
            other.longitude,
        );

        haversine * Length::new::<meter>(SEMI_MAJOR_AXIS)
    }

    /// Converts this location into Earth-Centered, Earth-Fixed coordinates in meters.
    ///
    /// See:
    /// <https://en.wikipedia.org/wiki/Geographic_coordinate_conversion#From_geodetic_to_ECEF_coordinates>
    pub(crate) fn to_ecef(self) -> Vector3 {
        let height_h = self.altitude.get::<meter>();
        let lon_lambda = self.longitude.get::<radian>();
        let lat_phi = self.latitude.get::<radian>();

        // https://en.wikipedia.org/wiki/Earth_radius#Prime_vertical
        let sin_phi = lat_phi.sin();
        let n_phi = SEMI_MAJOR_AXIS / (1. - ECCENTRICITY_SQ * sin_phi * sin_phi).sqrt();

        let x = (n_phi + height_h) * lat_phi.cos() * lon_lambda.cos();
        let y = (n_phi + height_h) * lat_phi.cos() * lon_lambda.sin();
        let z = ((1. - ECCENTRICITY_SQ) * n_phi + height_h) * sin_phi;

        Vector3::new(x, y, z)
    }

    /// Converts Earth-Centered, Earth-Fixed coordinates in meters into a geodetic location.
    ///
    /// There is no closed form that is both simple and well-behaved everywhere, so the latitude
    /// is refined by fixed-point iteration on
    ///
    /// ```text
    /// φ = atan2(z + e² N(φ) sin φ, √(x² + y²))
    /// ```
    ///
    /// which converges quickly for anything that isn't deep inside the earth. `atan2` keeps the
    /// poles (where `√(x² + y²)` is zero) well-defined. The altitude then uses
    /// `h = r cos φ + z sin φ - a √(1 - e² sin² φ)`, which unlike `r / cos φ - N` holds up near the
    /// poles too.
    pub(crate) fn from_ecef(ecef: Vector3) -> Self {
        let lon = ecef.y.atan2(ecef.x);
        let r = ecef.x.hypot(ecef.y);

        let mut lat = ecef.z.atan2(r * (1. - ECCENTRICITY_SQ));
        for _ in 0..MAX_LATITUDE_ITERATIONS {
            let sin_phi = lat.sin();
            let n_phi = SEMI_MAJOR_AXIS / (1. - ECCENTRICITY_SQ * sin_phi * sin_phi).sqrt();
            let next = (ecef.z + ECCENTRICITY_SQ * n_phi * sin_phi).atan2(r);
            let delta = (next - lat).abs();
            lat = next;
            if !(delta > f64::EPSILON) {
                // also stops on NaN so we don't spin on garbage input
                break;
            }
        }

        let (sin_phi, cos_phi) = lat.sin_cos();
        let altitude = r * cos_phi + ecef.z * sin_phi
            - SEMI_MAJOR_AXIS * (1. - ECCENTRICITY_SQ * sin_phi * sin_phi).sqrt();

        Self::new(
            Angle::new::<radian>(lat),
            Angle::new::<radian>(lon),
            Length::new::<meter>(altitude),
        )
    }
}

impl Display for Wgs84 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat = self.latitude.get::<degree>();
        let lon = self.longitude().get::<degree>();
        let alt = self.altitude.get::<meter>();
        let ns = if lat.is_sign_negative() { 'S' } else { 'N' };
        let ew = if lon.is_sign_negative() { 'W' } else { 'E' };
        // ~1cm; angles don't survive the trip through radians bit-for-bit
        write!(f, "{:.7}°{ns}, {:.7}°{ew}, {alt}m", lat.abs(), lon.abs())
    }
}

/// Computes the central angle between the given lat/lon points.
///
/// To turn this angle into [great-circle distance], multiply this value by the radius of the
/// sphere (ie, of the earth).
///
/// The current implementation computes this [using the archaversine] (inverse haversine).
///
/// [great-circle distance]: https://en.wikipedia.org/wiki/Great-circle_distance
/// [using the archaversine]: https://en.wikipedia.org/wiki/Haversine_formula#Formulation
pub(crate) fn central_angle_by_inverse_haversine(
    lat_a: Angle,
    lat_b: Angle,
    lon_a: Angle,
    lon_b: Angle,
) -> Angle {
    let lat_a = lat_a.get::<radian>(); // φ1
    let lat_b = lat_b.get::<radian>(); // φ2
    let lon_a = lon_a.get::<radian>(); // λ1
    let lon_b = lon_b.get::<radian>(); // λ2
    let delta_lat = lat_b - lat_a;
    let delta_lon = lon_b - lon_a;

    let inner = 1. - delta_lat.cos() + lat_a.cos() * lat_b.cos() * (1. - delta_lon.cos());
    // rounding can push `inner` a hair outside [0, 2]
    Angle::new::<radian>(2. * (inner / 2.).clamp(0., 1.).sqrt().asin())
}

/// Moves between North-East-Down offsets around an anchor and geodetic locations.
///
/// Constructing a converter does the trigonometry for the anchor once, so prefer holding on to
/// one over the free functions [`ned_to_geodetic`] and [`geodetic_to_ned`] when converting many
/// points around the same anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticConverter {
    anchor: Wgs84,
    anchor_ecef: Vector3,
    /// Columns are the north, east, and down unit vectors at the anchor, in ECEF.
    ned_to_ecef: Matrix3,
}

impl GeodeticConverter {
    /// Constructs a converter for the tangent plane at `anchor`.
    #[must_use]
    pub fn new(anchor: Wgs84) -> Self {
        let phi = anchor.latitude.get::<radian>();
        let lambda = anchor.longitude.get::<radian>();

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let sin_lambda = lambda.sin();
        let cos_lambda = lambda.cos();

        // See
        // <https://en.wikipedia.org/wiki/Local_tangent_plane_coordinates#Local_north,_east,_down_(NED)_coordinates>.
        // That gives the ECEF to NED rotation; we store its transpose, with N, E, D as columns.
        let ned_to_ecef = Matrix3::new(
            -cos_lambda * sin_phi,
            -sin_lambda,
            -cos_lambda * cos_phi,
            -sin_lambda * sin_phi,
            cos_lambda,
            -sin_lambda * cos_phi,
            cos_phi,
            0.,
            -sin_phi,
        );

        Self {
            anchor,
            anchor_ecef: anchor.to_ecef(),
            ned_to_ecef,
        }
    }

    /// Returns the location the tangent plane of this converter touches the ellipsoid.
    #[must_use]
    pub fn anchor(&self) -> Wgs84 {
        self.anchor
    }

    /// Converts an offset of `north`, `east`, and `down` meters from the anchor into a geodetic
    /// location.
    #[must_use]
    pub fn ned_to_geodetic(&self, north: f64, east: f64, down: f64) -> Wgs84 {
        let ecef = self.anchor_ecef + self.ned_to_ecef * Vector3::new(north, east, down);
        Wgs84::from_ecef(ecef)
    }

    /// Converts a geodetic location into `(north, east, down)` meters from the anchor.
    #[must_use]
    pub fn geodetic_to_ned(&self, location: &Wgs84) -> (f64, f64, f64) {
        let delta = location.to_ecef() - self.anchor_ecef;
        let ned = self.ned_to_ecef.transpose() * delta;
        (ned.x, ned.y, ned.z)
    }
}

/// Converts a North-East-Down offset (in meters) from the anchor at `anchor_lat`, `anchor_lon`
/// (degrees) and `anchor_alt` (meters) into `(latitude, longitude, altitude)` in degrees, degrees,
/// and meters.
///
/// This is the inverse of [`geodetic_to_ned`].
#[must_use]
pub fn ned_to_geodetic(
    anchor_lat: f64,
    anchor_lon: f64,
    anchor_alt: f64,
    north: f64,
    east: f64,
    down: f64,
) -> (f64, f64, f64) {
    GeodeticConverter::new(Wgs84::from_degrees_and_meters(anchor_lat, anchor_lon, anchor_alt))
        .ned_to_geodetic(north, east, down)
        .to_degrees_and_meters()
}

/// Converts a location given as `lat`, `lon` (degrees) and `alt` (meters) into
/// `(north, east, down)` meters from the anchor at `anchor_lat`, `anchor_lon` (degrees) and
/// `anchor_alt` (meters).
///
/// This is the inverse of [`ned_to_geodetic`].
#[must_use]
pub fn geodetic_to_ned(
    anchor_lat: f64,
    anchor_lon: f64,
    anchor_alt: f64,
    lat: f64,
    lon: f64,
    alt: f64,
) -> (f64, f64, f64) {
    GeodeticConverter::new(Wgs84::from_degrees_and_meters(anchor_lat, anchor_lon, anchor_alt))
        .geodetic_to_ned(&Wgs84::from_degrees_and_meters(lat, lon, alt))
}
