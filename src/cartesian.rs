//! The [`Cartesian`](FrameFamily::Cartesian) family: right-handed X/Y/Z axes in meters.

use crate::conversions;
use crate::coordinates::{Pose, Position};
use crate::error::UndefinedTransform;
use crate::family::FrameFamily;
use crate::ops::{
    default_normalize_angular, default_normalize_linear, default_normalize_pose, FrameOps,
};
use crate::rotation::{self, orient_linear_vec};

pub(crate) static CARTESIAN: FrameOps = FrameOps {
    family: FrameFamily::Cartesian,
    transform_linear_to_origin,
    transform_linear_from_origin,
    normalize_linear: default_normalize_linear,
    calc_distance,
    transform_angular_to_origin: rotation::transform_angular_to_origin,
    transform_angular_from_origin: rotation::transform_angular_from_origin,
    normalize_angular: default_normalize_angular,
    calc_angle: rotation::calc_angle,
    transform_pose_to_origin: rotation::transform_pose_to_origin,
    transform_pose_from_origin: rotation::transform_pose_from_origin,
    normalize_pose: default_normalize_pose,
};

/// Returns the straight-line distance between `a` and `b`.
pub fn calc_distance(_ops: &FrameOps, a: &Position, b: &Position) -> f64 {
    (b.to_nalgebra_vector() - a.to_nalgebra_vector()).norm()
}

/// Moves `position` from a Cartesian frame into `origin`.
///
/// Between two Cartesian frames this rotates by the frame's orientation and, if `fixed`, then
/// translates by the frame's position. Any other origin goes through the
/// [`ConversionRegistry`](crate::ConversionRegistry).
pub fn transform_linear_to_origin(
    origin: &FrameOps,
    this: &FrameOps,
    frame: &Pose,
    position: &mut Position,
    fixed: bool,
) -> Result<(), UndefinedTransform> {
    if origin.is_same_family(this) {
        rigid_to_origin(frame, position, fixed);
        Ok(())
    } else {
        conversions::linear_to_origin(origin, this, frame, position, fixed)
    }
}

/// The inverse of [`transform_linear_to_origin`].
pub fn transform_linear_from_origin(
    origin: &FrameOps,
    this: &FrameOps,
    frame: &Pose,
    position: &mut Position,
    fixed: bool,
) -> Result<(), UndefinedTransform> {
    if origin.is_same_family(this) {
        rigid_from_origin(frame, position, fixed);
        Ok(())
    } else {
        conversions::linear_from_origin(origin, this, frame, position, fixed)
    }
}

/// Rotates `position` by `frame`'s orientation, then translates it by `frame`'s position if
/// `fixed`.
pub(crate) fn rigid_to_origin(frame: &Pose, position: &mut Position, fixed: bool) {
    orient_linear_vec(position, &frame.orientation, false);
    if fixed {
        position.x += frame.position.x;
        position.y += frame.position.y;
        position.z += frame.position.z;
    }
}

/// Undoes [`rigid_to_origin`]: removes the translation first, then the rotation.
pub(crate) fn rigid_from_origin(frame: &Pose, position: &mut Position, fixed: bool) {
    if fixed {
        position.x -= frame.position.x;
        position.y -= frame.position.y;
        position.z -= frame.position.z;
    }
    orient_linear_vec(position, &frame.orientation, true);
}
