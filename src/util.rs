use uom::si::angle::radian;
use uom::si::f64::Angle;

/// An angle kept in [0°, 360°).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BoundedAngle {
    angle: Angle,
}

impl BoundedAngle {
    pub(crate) fn new(angle: impl Into<Angle>) -> Self {
        Self {
            // NOTE: uom may store the value differently-normalized, so we normalize on output too.
            angle: Angle::new::<radian>(Self::into_bounds(angle.into())),
        }
    }

    /// Returns the angle in [0°, 360°) in radians.
    pub(crate) fn get_bounded(self) -> f64 {
        Self::into_bounds(self.angle)
    }

    fn into_bounds(angle: Angle) -> f64 {
        let out_of_bounds: f64 = angle.get::<radian>();
        let bounded = out_of_bounds.rem_euclid(Angle::FULL_TURN.get::<radian>());
        // rem_euclid can round up to exactly one full turn for tiny negative inputs
        if bounded >= Angle::FULL_TURN.get::<radian>() {
            0.
        } else {
            bounded
        }
    }

    /// Returns the angle in [-180°, 180°) in radians.
    pub(crate) fn to_signed_range(self) -> f64 {
        let angle = self.get_bounded();
        if angle < Angle::HALF_TURN.get::<radian>() {
            angle
        } else {
            angle - Angle::FULL_TURN.get::<radian>()
        }
    }
}

/// Wraps an angle in degrees into [-180, 180).
///
/// Values already in range come back bit-for-bit.
pub(crate) fn signed_degrees(degrees: f64) -> f64 {
    if (-180.0..180.0).contains(&degrees) {
        return degrees;
    }
    let wrapped = (degrees + 180.).rem_euclid(360.) - 180.;
    if wrapped >= 180. {
        -180.
    } else {
        wrapped
    }
}

/// Brings a latitude/longitude pair (in degrees) into latitude [-90, 90] and longitude
/// [-180, 180).
///
/// A latitude that runs over a pole comes back down the other side of the globe, which also moves
/// the longitude by half a turn.
pub(crate) fn canonical_lat_lon_degrees(latitude: f64, longitude: f64) -> (f64, f64) {
    let mut latitude = signed_degrees(latitude);
    let mut longitude = longitude;
    if latitude > 90. {
        latitude = 180. - latitude;
        longitude += 180.;
    } else if latitude < -90. {
        latitude = -180. - latitude;
        longitude += 180.;
    }
    (latitude, signed_degrees(longitude))
}
