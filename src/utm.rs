//! The [`Utm`](FrameFamily::Utm) family: easting, northing, and altitude in meters.
//!
//! Within a UTM zone positions behave like any other set of Cartesian axes, so same-family hops
//! are the same rigid transform [`Cartesian`](FrameFamily::Cartesian) frames use. No projection
//! to or from other families is registered.

use crate::cartesian::{calc_distance, rigid_from_origin, rigid_to_origin};
use crate::conversions;
use crate::coordinates::{Pose, Position};
use crate::error::UndefinedTransform;
use crate::family::FrameFamily;
use crate::ops::{
    default_normalize_angular, default_normalize_linear, default_normalize_pose, FrameOps,
};
use crate::rotation;

pub(crate) static UTM: FrameOps = FrameOps {
    family: FrameFamily::Utm,
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
