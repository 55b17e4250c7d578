//! Orientation math shared by every frame family.
//!
//! An [`Orientation`] `(orx, ory, orz)` is read as [intrinsic] [Tait-Bryan angles][tb]: first a
//! yaw of `orz` about Z, then a pitch of `ory` about the new Y, then a roll of `orx` about the
//! resulting X. This is the same 3-2-1 sequence [`nalgebra::UnitQuaternion::from_euler_angles`]
//! implements, so we pass the components straight through (minding the argument order).
//!
//! Rotating orientations is independent of the kind of frame they live in. Only positions need a
//! map projection when crossing between frame families, so the functions in this module are used
//! as-is by the [`FrameOps`] tables of every family.
//!
//! [intrinsic]: https://dominicplein.medium.com/extrinsic-intrinsic-rotation-do-i-multiply-from-right-or-left-357c38c1abfd
//! [tb]: https://en.wikipedia.org/wiki/Euler_angles#Tait%E2%80%93Bryan_angles

use crate::coordinates::{Orientation, Pose, Position};
use crate::error::UndefinedTransform;
use crate::ops::FrameOps;
use crate::UnitQuaternion;
use uom::si::angle::radian;
use uom::si::f64::Angle;

/// Returns the rotation described by `orientation`.
pub(crate) fn rotation_of(orientation: &Orientation) -> UnitQuaternion {
    UnitQuaternion::from_euler_angles(orientation.orx, orientation.ory, orientation.orz)
}

/// Returns the orientation components that describe `rotation`.
///
/// Pitch comes back in [-π/2, π/2] and roll and yaw in [-π, π], so the result may differ
/// component-wise from whatever orientation produced `rotation` while describing the same
/// rotation.
pub(crate) fn orientation_of(rotation: &UnitQuaternion) -> Orientation {
    let (roll, pitch, yaw) = rotation.euler_angles();
    Orientation::new(roll, pitch, yaw)
}

/// Rotates `position` in place by `orientation`.
///
/// With `inverse` set, the inverse (ie, transposed) rotation is applied instead, which undoes a
/// previous call with the same `orientation`.
pub fn orient_linear_vec(position: &mut Position, orientation: &Orientation, inverse: bool) {
    if orientation.is_zero() {
        return;
    }
    let rotation = rotation_of(orientation);
    let v = position.to_nalgebra_vector();
    let rotated = if inverse {
        rotation.inverse_transform_vector(&v)
    } else {
        rotation.transform_vector(&v)
    };
    *position = Position::from_nalgebra_vector(rotated);
}

/// Expresses `orientation`, given relative to a frame with orientation `frame` in its origin, in
/// that origin instead.
pub fn transform_angular_to_origin(
    _origin: &FrameOps,
    _this: &FrameOps,
    frame: &Orientation,
    orientation: &mut Orientation,
) {
    if frame.is_zero() {
        return;
    }
    *orientation = orientation_of(&(rotation_of(frame) * rotation_of(orientation)));
}

/// The inverse of [`transform_angular_to_origin`].
pub fn transform_angular_from_origin(
    _origin: &FrameOps,
    _this: &FrameOps,
    frame: &Orientation,
    orientation: &mut Orientation,
) {
    if frame.is_zero() {
        return;
    }
    *orientation = orientation_of(&(rotation_of(frame).inverse() * rotation_of(orientation)));
}

/// Returns the smallest angle one must rotate by to go from orientation `a` to orientation `b`.
///
/// The result is always in [0, π].
pub fn calc_angle(_ops: &FrameOps, a: &Orientation, b: &Orientation) -> Angle {
    Angle::new::<radian>(rotation_of(a).angle_to(&rotation_of(b)))
}

/// Expresses `pose`, given relative to a frame with pose `frame` in its origin, in that origin
/// instead.
///
/// The position goes through `this`'s linear transform (which may fail) before the orientation is
/// touched, so on error `pose` is left exactly as it was.
pub fn transform_pose_to_origin(
    origin: &FrameOps,
    this: &FrameOps,
    frame: &Pose,
    pose: &mut Pose,
    fixed: bool,
) -> Result<(), UndefinedTransform> {
    this.transform_linear_to_origin(origin, frame, &mut pose.position, fixed)?;
    this.transform_angular_to_origin(origin, &frame.orientation, &mut pose.orientation);
    Ok(())
}

/// The inverse of [`transform_pose_to_origin`].
pub fn transform_pose_from_origin(
    origin: &FrameOps,
    this: &FrameOps,
    frame: &Pose,
    pose: &mut Pose,
    fixed: bool,
) -> Result<(), UndefinedTransform> {
    this.transform_linear_from_origin(origin, frame, &mut pose.position, fixed)?;
    this.transform_angular_from_origin(origin, &frame.orientation, &mut pose.orientation);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        calc_angle, orient_linear_vec, transform_angular_from_origin, transform_angular_to_origin,
    };
    use crate::coordinates::{Orientation, Position};
    use crate::ops::FrameOps;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::quickcheck;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, PI};
    use uom::si::angle::radian;

    #[rstest]
    #[case(Position::new(1., 0., 0.), Orientation::ZERO, Position::new(1., 0., 0.))]
    // yaw
    #[case(Position::new(1., 0., 0.), Orientation::new(0., 0., FRAC_PI_2), Position::new(0., 1., 0.))]
    #[case(Position::new(1., 0., 0.), Orientation::new(0., 0., PI), Position::new(-1., 0., 0.))]
    #[case(Position::new(0., 1., 0.), Orientation::new(0., 0., -FRAC_PI_2), Position::new(1., 0., 0.))]
    // pitch
    #[case(Position::new(1., 0., 0.), Orientation::new(0., FRAC_PI_2, 0.), Position::new(0., 0., -1.))]
    // roll
    #[case(Position::new(0., 1., 0.), Orientation::new(FRAC_PI_2, 0., 0.), Position::new(0., 0., 1.))]
    // yaw, then pitch about the yawed Y axis
    #[case(Position::new(1., 0., 0.), Orientation::new(0., FRAC_PI_2, FRAC_PI_2), Position::new(0., 0., -1.))]
    #[case(Position::new(0., 0., 1.), Orientation::new(0., FRAC_PI_2, FRAC_PI_2), Position::new(0., 1., 0.))]
    fn rotates_vectors(
        #[case] input: Position,
        #[case] orientation: Orientation,
        #[case] expected: Position,
    ) {
        let mut p = input;
        orient_linear_vec(&mut p, &orientation, false);
        assert_abs_diff_eq!(p, expected, epsilon = 1e-12);

        orient_linear_vec(&mut p, &orientation, true);
        assert_abs_diff_eq!(p, input, epsilon = 1e-12);
    }

    fn try_inverse_roundtrip(p: Position, orientation: Orientation) {
        let mut q = p;
        orient_linear_vec(&mut q, &orientation, false);
        let length = |p: &Position| p.to_nalgebra_vector().norm();
        assert_relative_eq!(length(&q), length(&p), max_relative = 1e-12, epsilon = 1e-9);
        orient_linear_vec(&mut q, &orientation, true);
        assert_abs_diff_eq!(q, p, epsilon = 1e-6);
    }

    quickcheck! {
        fn orient_inverse_roundtrip(p: Position, orientation: Orientation) -> () {
            try_inverse_roundtrip(p, orientation);
        }
    }

    fn try_angular_roundtrip(frame: Orientation, orientation: Orientation) {
        let ops = FrameOps::cartesian();
        let mut o = orientation;
        transform_angular_to_origin(ops, ops, &frame, &mut o);
        transform_angular_from_origin(ops, ops, &frame, &mut o);
        // extracting angles near ±90° pitch is poorly conditioned, hence the looser epsilon
        assert_abs_diff_eq!(o, orientation, epsilon = 1e-6);
    }

    quickcheck! {
        fn angular_roundtrip(frame: Orientation, orientation: Orientation) -> () {
            try_angular_roundtrip(frame, orientation);
        }
    }

    #[test]
    fn angular_composes_with_linear() {
        // an object facing along +X in a frame yawed by 90° faces along +Y in the origin
        let ops = FrameOps::cartesian();
        let frame = Orientation::new(0., 0., FRAC_PI_2);
        let mut facing = Orientation::ZERO;
        transform_angular_to_origin(ops, ops, &frame, &mut facing);
        assert_abs_diff_eq!(facing, frame, epsilon = 1e-12);

        let mut nose = Position::new(1., 0., 0.);
        orient_linear_vec(&mut nose, &facing, false);
        assert_abs_diff_eq!(nose, Position::new(0., 1., 0.), epsilon = 1e-12);
    }

    #[rstest]
    #[case(Orientation::ZERO, Orientation::ZERO, 0.)]
    #[case(Orientation::ZERO, Orientation::new(0., 0., 0.5), 0.5)]
    #[case(Orientation::new(0.3, 0., 0.), Orientation::new(-0.2, 0., 0.), 0.5)]
    #[case(Orientation::new(0., 0., -PI + 0.1), Orientation::new(0., 0., PI - 0.1), 0.2)]
    #[case(Orientation::ZERO, Orientation::new(0., 0., PI), PI)]
    fn angles_between_orientations(
        #[case] a: Orientation,
        #[case] b: Orientation,
        #[case] expected: f64,
    ) {
        let angle = calc_angle(FrameOps::cartesian(), &a, &b);
        assert_relative_eq!(angle.get::<radian>(), expected, epsilon = 1e-6);
    }
}
