use crate::Vector3;
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position `(x, y, z)` in some frame.
///
/// The meaning of the components is dictated by the [`FrameFamily`](crate::FrameFamily) of the
/// frame the position is expressed in:
///
/// - in [`Cartesian`](crate::FrameFamily::Cartesian) frames, `x`, `y`, and `z` are meters along
///   the frame's axes;
/// - in [`Gps`](crate::FrameFamily::Gps) frames, `x` is latitude in degrees, `y` is longitude in
///   degrees, and `z` is altitude in meters above the WGS84 ellipsoid;
/// - in [`Utm`](crate::FrameFamily::Utm) frames, `x` is easting, `y` is northing, and `z` is
///   altitude, all in meters.
///
/// Positions carry no frame of their own, so nothing stops you from feeding a GPS position to a
/// Cartesian operation. Keep track of which family a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// The position at `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0., 0., 0.);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns true if every component is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x == 0. && self.y == 0. && self.z == 0.
    }

    pub(crate) fn to_nalgebra_vector(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub(crate) fn from_nalgebra_vector(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<(f64, f64, f64)> for Position {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Position> for (f64, f64, f64) {
    fn from(p: Position) -> Self {
        (p.x, p.y, p.z)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An orientation `(orx, ory, orz)` in radians.
///
/// The three components are rotations about the X, Y, and Z axes respectively (ie, roll, pitch,
/// and yaw), applied in the order described in [`orient_linear_vec`](crate::rotation::orient_linear_vec).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orientation {
    pub orx: f64,
    pub ory: f64,
    pub orz: f64,
}

impl Orientation {
    /// The orientation that applies no rotation.
    pub const ZERO: Self = Self::new(0., 0., 0.);

    #[must_use]
    pub const fn new(orx: f64, ory: f64, orz: f64) -> Self {
        Self { orx, ory, orz }
    }

    /// Returns true if every component is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.orx == 0. && self.ory == 0. && self.orz == 0.
    }
}

impl From<(f64, f64, f64)> for Orientation {
    fn from((orx, ory, orz): (f64, f64, f64)) -> Self {
        Self::new(orx, ory, orz)
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.orx, self.ory, self.orz)
    }
}

/// A [`Position`] together with an [`Orientation`].
///
/// When used to describe a frame, this is the frame's pose relative to its origin frame: the
/// position is where the frame's zero lies in the origin (in the origin's family), and the
/// orientation is how the frame's axes are rotated with respect to the origin's.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub position: Position,
    pub orientation: Orientation,
}

impl Pose {
    /// The pose at zero position with zero orientation.
    pub const ZERO: Self = Self::new(Position::ZERO, Orientation::ZERO);

    #[must_use]
    pub const fn new(position: Position, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Constructs a pose from its six scalar components.
    #[must_use]
    pub const fn from_components(
        x: f64,
        y: f64,
        z: f64,
        orx: f64,
        ory: f64,
        orz: f64,
    ) -> Self {
        Self::new(Position::new(x, y, z), Orientation::new(orx, ory, orz))
    }

    /// Returns true if both the position and the orientation are exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.position.is_zero() && self.orientation.is_zero()
    }
}

impl Display for Pose {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.position, self.orientation)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Position {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-6
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: this checks each component on its own, not the distance between the two.
        self.to_nalgebra_vector()
            .abs_diff_eq(&other.to_nalgebra_vector(), epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Position {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.to_nalgebra_vector()
            .relative_eq(&other.to_nalgebra_vector(), epsilon, max_relative)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Orientation {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-6
    }

    /// Orientations are equal if they describe the same rotation, even when their components
    /// differ (eg, a yaw of 2π is the same as no yaw at all).
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: q and -q are the same rotation. we compare quaternion components rather than
        // the angle between the two since acos loses most of its precision near zero.
        let a = crate::rotation::rotation_of(self).into_inner().coords;
        let b = crate::rotation::rotation_of(other).into_inner().coords;
        (a - b).amax() <= epsilon || (a + b).amax() <= epsilon
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Orientation {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        _max_relative: Self::Epsilon,
    ) -> bool {
        self.abs_diff_eq(other, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Pose {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-6
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.position.abs_diff_eq(&other.position, epsilon)
            && self.orientation.abs_diff_eq(&other.orientation, epsilon)
    }
}
