//! Per-family operation tables.
//!
//! Rather than a trait object per frame, every [`FrameFamily`] is bound to exactly one
//! [`FrameOps`] table of plain function pointers. The tables are `static`s built at compile time,
//! carry no references to one another, and are never mutated, so they can be shared freely across
//! threads and need no initialization order. Knowledge about how to move *between* families lives
//! in the [`ConversionRegistry`](crate::ConversionRegistry) instead, which is bound later.

use crate::coordinates::{Orientation, Pose, Position};
use crate::error::UndefinedTransform;
use crate::family::FrameFamily;
use crate::{cartesian, gps, utm};
use std::fmt;
use uom::si::f64::Angle;

/// Transforms a position of `this` family between `this` and `origin`, given `this`'s pose in the
/// origin.
pub type LinearTransformFn =
    fn(&FrameOps, &FrameOps, &Pose, &mut Position, bool) -> Result<(), UndefinedTransform>;
/// Canonicalizes a position into the family's valid domain.
pub type NormalizeLinearFn = fn(&FrameOps, &mut Position);
/// Distance between two positions of the same family, in that family's distance unit.
pub type DistanceFn = fn(&FrameOps, &Position, &Position) -> f64;
/// Transforms an orientation between `this` and `origin`, given `this`'s orientation in the
/// origin.
pub type AngularTransformFn = fn(&FrameOps, &FrameOps, &Orientation, &mut Orientation);
/// Canonicalizes an orientation into the family's valid domain.
pub type NormalizeAngularFn = fn(&FrameOps, &mut Orientation);
/// Angle between two orientations.
pub type AngleFn = fn(&FrameOps, &Orientation, &Orientation) -> Angle;
/// Transforms a pose of `this` family between `this` and `origin`, given `this`'s pose in the
/// origin.
pub type PoseTransformFn =
    fn(&FrameOps, &FrameOps, &Pose, &mut Pose, bool) -> Result<(), UndefinedTransform>;
/// Canonicalizes a pose into the family's valid domain.
pub type NormalizePoseFn = fn(&FrameOps, &mut Pose);

/// The operations one [`FrameFamily`] supports.
///
/// Every transform takes the table of the origin frame, the table of the frame whose coordinates
/// are being transformed (`this`), that frame's pose relative to the origin, the value to
/// transform (modified in place), and whether the frame is `fixed`. Fixed frames are translated
/// as well as rotated; frames that are not fixed only ever have their rotation applied.
///
/// Use [`FrameOps::for_family`], [`FrameOps::by_id`], or [`FrameOps::by_name`] to get at the
/// tables, and call the operations through the methods of the same name.
pub struct FrameOps {
    pub(crate) family: FrameFamily,
    pub(crate) transform_linear_to_origin: LinearTransformFn,
    pub(crate) transform_linear_from_origin: LinearTransformFn,
    pub(crate) normalize_linear: NormalizeLinearFn,
    pub(crate) calc_distance: DistanceFn,
    pub(crate) transform_angular_to_origin: AngularTransformFn,
    pub(crate) transform_angular_from_origin: AngularTransformFn,
    pub(crate) normalize_angular: NormalizeAngularFn,
    pub(crate) calc_angle: AngleFn,
    pub(crate) transform_pose_to_origin: PoseTransformFn,
    pub(crate) transform_pose_from_origin: PoseTransformFn,
    pub(crate) normalize_pose: NormalizePoseFn,
}

impl fmt::Debug for FrameOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameOps")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

impl FrameOps {
    /// Returns the table for `family`.
    #[must_use]
    pub fn for_family(family: FrameFamily) -> &'static FrameOps {
        match family {
            FrameFamily::Cartesian => &cartesian::CARTESIAN,
            FrameFamily::Gps => &gps::GPS,
            FrameFamily::Utm => &utm::UTM,
        }
    }

    /// Returns the table for the family with the given numeric id.
    #[must_use]
    pub fn by_id(id: u8) -> Option<&'static FrameOps> {
        FrameFamily::from_id(id).map(Self::for_family)
    }

    /// Returns the table for the family with the given name (ignoring ASCII case).
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static FrameOps> {
        FrameFamily::from_name(name).map(Self::for_family)
    }

    #[must_use]
    pub fn cartesian() -> &'static FrameOps {
        &cartesian::CARTESIAN
    }

    #[must_use]
    pub fn gps() -> &'static FrameOps {
        &gps::GPS
    }

    #[must_use]
    pub fn utm() -> &'static FrameOps {
        &utm::UTM
    }

    #[must_use]
    pub fn family(&self) -> FrameFamily {
        self.family
    }

    #[must_use]
    pub fn id(&self) -> u8 {
        self.family.id()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.family.name()
    }

    /// Returns true if `self` and `other` are the table of the same family.
    #[must_use]
    pub fn is_same_family(&self, other: &FrameOps) -> bool {
        self.family == other.family
    }

    /// Rewrites `position`, expressed in a frame of this family with pose `frame` in `origin`,
    /// into `origin`.
    ///
    /// Fails without touching `position` if no path exists from this family into `origin`'s.
    pub fn transform_linear_to_origin(
        &self,
        origin: &FrameOps,
        frame: &Pose,
        position: &mut Position,
        fixed: bool,
    ) -> Result<(), UndefinedTransform> {
        (self.transform_linear_to_origin)(origin, self, frame, position, fixed)
    }

    /// Rewrites `position`, expressed in `origin`, into a frame of this family with pose `frame`
    /// in `origin`.
    ///
    /// Fails without touching `position` if no path exists from `origin`'s family into this one.
    pub fn transform_linear_from_origin(
        &self,
        origin: &FrameOps,
        frame: &Pose,
        position: &mut Position,
        fixed: bool,
    ) -> Result<(), UndefinedTransform> {
        (self.transform_linear_from_origin)(origin, self, frame, position, fixed)
    }

    pub fn normalize_linear(&self, position: &mut Position) {
        (self.normalize_linear)(self, position);
    }

    /// Returns the distance between two positions of this family.
    ///
    /// Both positions must already be expressed in this family.
    #[must_use]
    pub fn distance(&self, a: &Position, b: &Position) -> f64 {
        (self.calc_distance)(self, a, b)
    }

    pub fn transform_angular_to_origin(
        &self,
        origin: &FrameOps,
        frame: &Orientation,
        orientation: &mut Orientation,
    ) {
        (self.transform_angular_to_origin)(origin, self, frame, orientation);
    }

    pub fn transform_angular_from_origin(
        &self,
        origin: &FrameOps,
        frame: &Orientation,
        orientation: &mut Orientation,
    ) {
        (self.transform_angular_from_origin)(origin, self, frame, orientation);
    }

    pub fn normalize_angular(&self, orientation: &mut Orientation) {
        (self.normalize_angular)(self, orientation);
    }

    /// Returns the angle between two orientations in frames of this family.
    #[must_use]
    pub fn angle(&self, a: &Orientation, b: &Orientation) -> Angle {
        (self.calc_angle)(self, a, b)
    }

    /// Like [`FrameOps::transform_linear_to_origin`], but also carries the orientation over.
    pub fn transform_pose_to_origin(
        &self,
        origin: &FrameOps,
        frame: &Pose,
        pose: &mut Pose,
        fixed: bool,
    ) -> Result<(), UndefinedTransform> {
        (self.transform_pose_to_origin)(origin, self, frame, pose, fixed)
    }

    /// Like [`FrameOps::transform_linear_from_origin`], but also carries the orientation over.
    pub fn transform_pose_from_origin(
        &self,
        origin: &FrameOps,
        frame: &Pose,
        pose: &mut Pose,
        fixed: bool,
    ) -> Result<(), UndefinedTransform> {
        (self.transform_pose_from_origin)(origin, self, frame, pose, fixed)
    }

    pub fn normalize_pose(&self, pose: &mut Pose) {
        (self.normalize_pose)(self, pose);
    }
}

/// Leaves the position as-is; every finite value is valid.
pub fn default_normalize_linear(_ops: &FrameOps, _position: &mut Position) {}

/// Leaves the orientation as-is; every finite value is valid.
pub fn default_normalize_angular(_ops: &FrameOps, _orientation: &mut Orientation) {}

/// Normalizes the position and the orientation of `pose` with the family's own normalizers.
pub fn default_normalize_pose(ops: &FrameOps, pose: &mut Pose) {
    ops.normalize_linear(&mut pose.position);
    ops.normalize_angular(&mut pose.orientation);
}
