//! The [`Gps`](FrameFamily::Gps) family: latitude and longitude in degrees and altitude in meters
//! on the WGS84 ellipsoid.

use crate::conversions;
use crate::coordinates::{Pose, Position};
use crate::error::UndefinedTransform;
use crate::family::FrameFamily;
use crate::geodetic::Wgs84;
use crate::ops::{default_normalize_angular, default_normalize_pose, FrameOps};
use crate::rotation;
use crate::util::canonical_lat_lon_degrees;
use uom::si::length::meter;

pub(crate) static GPS: FrameOps = FrameOps {
    family: FrameFamily::Gps,
    transform_linear_to_origin,
    transform_linear_from_origin,
    normalize_linear,
    calc_distance,
    transform_angular_to_origin: rotation::transform_angular_to_origin,
    transform_angular_from_origin: rotation::transform_angular_from_origin,
    normalize_angular: default_normalize_angular,
    calc_angle: rotation::calc_angle,
    transform_pose_to_origin: rotation::transform_pose_to_origin,
    transform_pose_from_origin: rotation::transform_pose_from_origin,
    normalize_pose: default_normalize_pose,
};

/// Brings latitude into [-90, 90] and longitude into [-180, 180); altitude is left alone.
///
/// Running over a pole continues down the other side of the globe.
pub fn normalize_linear(_ops: &FrameOps, position: &mut Position) {
    let (lat, lon) = canonical_lat_lon_degrees(position.x, position.y);
    position.x = lat;
    position.y = lon;
}

/// Returns the distance in meters between two geodetic positions.
///
/// This combines the great-circle distance along the surface with the difference in altitude, so
/// it slightly underestimates distances between points high above the surface.
pub fn calc_distance(_ops: &FrameOps, a: &Position, b: &Position) -> f64 {
    let a = Wgs84::from_degrees_and_meters(a.x, a.y, a.z);
    let b = Wgs84::from_degrees_and_meters(b.x, b.y, b.z);
    let surface = a.haversine_distance_on_surface(&b).get::<meter>();
    let vertical = (b.altitude() - a.altitude()).get::<meter>();
    surface.hypot(vertical)
}

/// Moves `position` from a GPS frame into `origin`.
///
/// Geodetic positions are absolute, so between two GPS frames the frame's orientation does not
/// apply to positions. If `fixed`, the frame's position is added as an offset in degrees latitude,
/// degrees longitude, and meters altitude. Any other origin goes through the
/// [`ConversionRegistry`](crate::ConversionRegistry).
pub fn transform_linear_to_origin(
    origin: &FrameOps,
    this: &FrameOps,
    frame: &Pose,
    position: &mut Position,
    fixed: bool,
) -> Result<(), UndefinedTransform> {
    if !origin.is_same_family(this) {
        return conversions::linear_to_origin(origin, this, frame, position, fixed);
    }
    if fixed {
        position.x += frame.position.x;
        position.y += frame.position.y;
        position.z += frame.position.z;
    }
    this.normalize_linear(position);
    Ok(())
}

/// The inverse of [`transform_linear_to_origin`].
///
/// Offsets that carry a position over a pole do not come back out the same way.
pub fn transform_linear_from_origin(
    origin: &FrameOps,
    this: &FrameOps,
    frame: &Pose,
    position: &mut Position,
    fixed: bool,
) -> Result<(), UndefinedTransform> {
    if !origin.is_same_family(this) {
        return conversions::linear_from_origin(origin, this, frame, position, fixed);
    }
    this.normalize_linear(position);
    if fixed {
        position.x -= frame.position.x;
        position.y -= frame.position.y;
        position.z -= frame.position.z;
    }
    this.normalize_linear(position);
    Ok(())
}
