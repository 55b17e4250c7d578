//! A single step between a frame and its origin.

use crate::conversions::{ConversionRegistry, Resolution};
use crate::coordinates::{Orientation, Pose, Position};
use crate::error::{Direction, UndefinedTransform};
use crate::ops::FrameOps;

/// Everything needed to move values across one edge of a frame tree: the tables of the origin
/// frame and of the frame below it (`this`), `this` frame's pose relative to the origin, and
/// whether `this` frame is fixed in the origin.
///
/// Walking a tree of frames is the caller's business; a `FrameHop` only ever crosses the one edge
/// it describes.
///
/// ```
/// use refframe::{FrameHop, FrameOps, Pose, Position};
///
/// // a Cartesian frame anchored at sea level on the equator and prime meridian
/// let hop = FrameHop::new(FrameOps::gps(), FrameOps::cartesian(), Pose::ZERO, true);
///
/// // a point 1km north of the anchor
/// let mut p = Position::new(1000., 0., 0.);
/// hop.position_to_origin(&mut p).expect("Cartesian frames can live in GPS origins");
/// assert!((p.x - 0.009_043_7).abs() < 1e-6);
/// assert!(p.y.abs() < 1e-12);
///
/// hop.position_from_origin(&mut p).expect("and back");
/// assert!((p.x - 1000.).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FrameHop {
    pub origin: &'static FrameOps,
    pub this: &'static FrameOps,
    pub pose: Pose,
    pub fixed: bool,
}

impl FrameHop {
    #[must_use]
    pub fn new(origin: &'static FrameOps, this: &'static FrameOps, pose: Pose, fixed: bool) -> Self {
        Self {
            origin,
            this,
            pose,
            fixed,
        }
    }

    /// True if values pass through this hop unchanged in either direction.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.origin.is_same_family(self.this) && self.pose.is_zero()
    }

    /// Reports how a value would be moved across this hop in `direction`.
    pub fn resolve(&self, direction: Direction) -> Result<Resolution<'static>, UndefinedTransform> {
        if self.is_identity() {
            return Ok(Resolution::Identity);
        }
        ConversionRegistry::global().resolve(self.this.family(), self.origin.family(), direction)
    }

    /// Rewrites `position` from `this` frame into the origin.
    pub fn position_to_origin(&self, position: &mut Position) -> Result<(), UndefinedTransform> {
        if self.is_identity() {
            return Ok(());
        }
        self.this
            .transform_linear_to_origin(self.origin, &self.pose, position, self.fixed)
    }

    /// Rewrites `position` from the origin into `this` frame.
    pub fn position_from_origin(&self, position: &mut Position) -> Result<(), UndefinedTransform> {
        if self.is_identity() {
            return Ok(());
        }
        self.this
            .transform_linear_from_origin(self.origin, &self.pose, position, self.fixed)
    }

    /// Rewrites `orientation` from `this` frame into the origin.
    ///
    /// Orientations only depend on the rotation between the two frames, so this never fails.
    pub fn orientation_to_origin(&self, orientation: &mut Orientation) {
        if self.is_identity() {
            return;
        }
        self.this
            .transform_angular_to_origin(self.origin, &self.pose.orientation, orientation);
    }

    /// Rewrites `orientation` from the origin into `this` frame.
    pub fn orientation_from_origin(&self, orientation: &mut Orientation) {
        if self.is_identity() {
            return;
        }
        self.this
            .transform_angular_from_origin(self.origin, &self.pose.orientation, orientation);
    }

    /// Rewrites `pose` from `this` frame into the origin.
    pub fn pose_to_origin(&self, pose: &mut Pose) -> Result<(), UndefinedTransform> {
        if self.is_identity() {
            return Ok(());
        }
        self.this
            .transform_pose_to_origin(self.origin, &self.pose, pose, self.fixed)
    }

    /// Rewrites `pose` from the origin into `this` frame.
    pub fn pose_from_origin(&self, pose: &mut Pose) -> Result<(), UndefinedTransform> {
        if self.is_identity() {
            return Ok(());
        }
        self.this
            .transform_pose_from_origin(self.origin, &self.pose, pose, self.fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::FrameHop;
    use crate::conversions::Resolution;
    use crate::coordinates::{Orientation, Pose, Position};
    use crate::error::Direction;
    use crate::family::FrameFamily;
    use crate::ops::FrameOps;
    use approx::assert_abs_diff_eq;
    use quickcheck::quickcheck;
    use rstest::rstest;

    fn try_identity(family: u8, p: Pose, fixed: bool) {
        let ops = FrameOps::for_family(FrameFamily::ALL[usize::from(family) % 3]);
        let hop = FrameHop::new(ops, ops, Pose::ZERO, fixed);
        assert!(hop.is_identity());

        let mut q = p;
        hop.pose_to_origin(&mut q).unwrap();
        assert_eq!(q, p);
        hop.pose_from_origin(&mut q).unwrap();
        assert_eq!(q, p);

        let mut position = p.position;
        hop.position_to_origin(&mut position).unwrap();
        hop.position_from_origin(&mut position).unwrap();
        assert_eq!(position, p.position);

        let mut orientation = p.orientation;
        hop.orientation_to_origin(&mut orientation);
        hop.orientation_from_origin(&mut orientation);
        assert_eq!(orientation, p.orientation);
    }

    quickcheck! {
        fn zero_pose_in_same_family_is_identity(family: u8, p: Pose, fixed: bool) -> () {
            try_identity(family, p, fixed);
        }
    }

    #[rstest]
    #[case(FrameOps::cartesian(), FrameOps::cartesian(), Pose::ZERO, "identity")]
    #[case(FrameOps::utm(), FrameOps::utm(), Pose::ZERO, "identity")]
    #[case(
        FrameOps::cartesian(),
        FrameOps::cartesian(),
        Pose::from_components(1., 0., 0., 0., 0., 0.),
        "same family"
    )]
    #[case(
        FrameOps::gps(),
        FrameOps::gps(),
        Pose::from_components(0., 0., 0., 0., 0., 0.1),
        "same family"
    )]
    #[case(FrameOps::gps(), FrameOps::cartesian(), Pose::ZERO, "registered")]
    #[case(FrameOps::utm(), FrameOps::cartesian(), Pose::ZERO, "undefined")]
    fn resolution(
        #[case] origin: &'static FrameOps,
        #[case] this: &'static FrameOps,
        #[case] pose: Pose,
        #[case] expected: &str,
    ) {
        let hop = FrameHop::new(origin, this, pose, true);
        let resolved = match hop.resolve(Direction::ToOrigin) {
            Ok(Resolution::Identity) => "identity",
            Ok(Resolution::SameFamily) => "same family",
            Ok(Resolution::Registered(_)) => "registered",
            Err(_) => "undefined",
        };
        assert_eq!(resolved, expected);
    }

    #[test]
    fn registered_path_is_reported() {
        let hop = FrameHop::new(FrameOps::gps(), FrameOps::cartesian(), Pose::ZERO, true);
        assert!(!hop.is_identity());
        let Ok(Resolution::Registered(path)) = hop.resolve(Direction::FromOrigin) else {
            panic!("Cartesian frames in GPS origins have a registered path");
        };
        assert_eq!(
            (path.this, path.origin),
            (FrameFamily::Cartesian, FrameFamily::Gps)
        );
    }

    #[rstest]
    #[case(FrameOps::cartesian(), FrameOps::gps())]
    #[case(FrameOps::cartesian(), FrameOps::utm())]
    #[case(FrameOps::gps(), FrameOps::utm())]
    #[case(FrameOps::utm(), FrameOps::gps())]
    fn undefined_hops_leave_values_alone(
        #[case] origin: &'static FrameOps,
        #[case] this: &'static FrameOps,
    ) {
        let hop = FrameHop::new(origin, this, Pose::from_components(1., 2., 3., 0.1, 0.2, 0.3), true);
        assert_eq!(
            hop.resolve(Direction::ToOrigin).unwrap_err().direction(),
            Direction::ToOrigin
        );

        let before = Pose::from_components(4., 5., 6., 0.4, 0.5, 0.6);
        let mut pose = before;
        assert!(hop.pose_to_origin(&mut pose).is_err());
        assert!(hop.pose_from_origin(&mut pose).is_err());
        let mut position = before.position;
        assert!(hop.position_to_origin(&mut position).is_err());
        assert!(hop.position_from_origin(&mut position).is_err());
        assert_eq!(pose, before);
        assert_eq!(position, before.position);
    }

    #[test]
    fn cartesian_in_gps() {
        // a sensor frame anchored in Tokyo, yawed to face east
        let hop = FrameHop::new(
            FrameOps::gps(),
            FrameOps::cartesian(),
            Pose::from_components(35.6762, 139.6503, 40., 0., 0., std::f64::consts::FRAC_PI_2),
            true,
        );

        // 100m along the sensor's X axis is 100m east of the anchor
        let mut pose = Pose::new(Position::new(100., 0., 0.), Orientation::ZERO);
        hop.pose_to_origin(&mut pose).unwrap();
        assert_abs_diff_eq!(pose.position.x, 35.6762, epsilon = 1e-7);
        assert!(pose.position.y > 139.6503);
        assert_abs_diff_eq!(
            FrameOps::gps().distance(
                &pose.position,
                &Position::new(35.6762, 139.6503, 40.)
            ),
            100.,
            // the haversine distance treats the earth as a sphere
            epsilon = 0.5
        );
        assert_abs_diff_eq!(
            pose.orientation,
            Orientation::new(0., 0., std::f64::consts::FRAC_PI_2),
            epsilon = 1e-9
        );

        hop.pose_from_origin(&mut pose).unwrap();
        assert_abs_diff_eq!(pose.position, Position::new(100., 0., 0.), epsilon = 1e-6);
        assert_abs_diff_eq!(pose.orientation, Orientation::ZERO, epsilon = 1e-9);
    }
}
