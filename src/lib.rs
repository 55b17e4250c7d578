//! This library moves positions, orientations, and poses between a reference frame and the frame
//! it is defined in (its "origin"), where the two frames need not be of the same kind.
//!
//! Every frame belongs to a [`FrameFamily`]: plain [Cartesian](FrameFamily::Cartesian) axes in
//! meters, [GPS](FrameFamily::Gps) latitude/longitude/altitude, or [UTM](FrameFamily::Utm)
//! easting/northing/altitude. Each family has exactly one [`FrameOps`] table that knows how to
//! transform, normalize, and measure values in frames of that family. A frame's pose in its origin
//! is always given in the origin's own coordinates, and a frame that is `fixed` in its origin is
//! translated as well as rotated, whereas one that is not only ever has its rotation applied.
//!
//! Moving between frames of the same family is a rigid transform. Moving between families needs
//! an explicit path in the [`ConversionRegistry`]; the only built-in one places Cartesian frames
//! in GPS origins by treating the Cartesian frame's axes (after its orientation is applied) as
//! North-East-Down at its geodetic anchor. Asking for a hop no path exists for yields an
//! [`UndefinedTransform`] error and leaves the value untouched.
//!
//! Walking a tree of frames is left to the caller. [`FrameHop`] bundles what is needed for
//! crossing one edge of such a tree.
//!
//! # Examples
//!
//! A radar mounted on a mast reports a detection in its own Cartesian frame. The radar's frame is
//! anchored at a known location and yawed to face east, so its X axis points east and its Y axis
//! points south.
//!
//! ```
//! use refframe::{FrameFamily, FrameOps, Pose, Position};
//!
//! let radar = FrameOps::cartesian();
//! let world = FrameOps::gps();
//!
//! // where the radar is, in the world: latitude and longitude in degrees, altitude in meters,
//! // then roll, pitch, and yaw in radians
//! let mount = Pose::from_components(59.9139, 10.7522, 120., 0., 0., std::f64::consts::FRAC_PI_2);
//!
//! // a detection 2km straight ahead of the radar and 300m below it
//! let mut detection = Position::new(2000., 0., 300.);
//! radar
//!     .transform_linear_to_origin(world, &mount, &mut detection, true)
//!     .expect("Cartesian frames can live in GPS origins");
//!
//! // the detection is due east of the radar, so the latitude barely changes
//! assert!((detection.x - 59.9139).abs() < 1e-3);
//! assert!(detection.y > 10.7522);
//! assert!(detection.z < 120.);
//!
//! // and we can go back the other way
//! radar
//!     .transform_linear_from_origin(world, &mount, &mut detection, true)
//!     .expect("and GPS origins can be brought into Cartesian frames");
//! assert!((detection.x - 2000.).abs() < 1e-6);
//! assert!((detection.z - 300.).abs() < 1e-6);
//!
//! // there is no way to put a GPS frame inside a Cartesian one though
//! let err = world
//!     .transform_linear_to_origin(radar, &Pose::ZERO, &mut detection, true)
//!     .unwrap_err();
//! assert_eq!(err.this_family(), FrameFamily::Gps);
//! ```
//!
//! The per-family tables do not depend on which frames are involved beyond their family, so the
//! same operations also work for orientations:
//!
//! ```
//! use refframe::{FrameOps, Orientation};
//! use uom::si::angle::degree;
//!
//! let ops = FrameOps::cartesian();
//!
//! // an object yawed 30° in a frame that is itself yawed 60° is yawed 90° in the origin
//! let frame = Orientation::new(0., 0., 60f64.to_radians());
//! let mut object = Orientation::new(0., 0., 30f64.to_radians());
//! ops.transform_angular_to_origin(ops, &frame, &mut object);
//! assert!((object.orz - 90f64.to_radians()).abs() < 1e-12);
//!
//! let between = ops.angle(&object, &Orientation::ZERO);
//! assert!((between.get::<degree>() - 90.).abs() < 1e-9);
//! ```

mod cartesian;
mod conversions;
mod coordinates;
mod error;
mod family;
mod geodetic;
mod gps;
mod hop;
mod ops;
mod utm;
mod util;

pub mod rotation;

pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type Matrix3 = nalgebra::Matrix3<f64>;
pub(crate) type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

pub use conversions::{ConversionPath, ConversionRegistry, PathFn, Resolution};
pub use coordinates::{Orientation, Pose, Position};
pub use error::{Direction, UndefinedTransform};
pub use family::FrameFamily;
pub use geodetic::{geodetic_to_ned, ned_to_geodetic, GeodeticConverter, Wgs84};
pub use hop::FrameHop;
pub use ops::{
    AngleFn, AngularTransformFn, DistanceFn, FrameOps, LinearTransformFn, NormalizeAngularFn,
    NormalizeLinearFn, NormalizePoseFn, PoseTransformFn,
};

/// The operations making up each family's table, for use when assembling paths or when calling
/// one family's operation in terms of another's.
pub mod families {
    /// The [`Cartesian`](crate::FrameFamily::Cartesian) family's operations.
    pub mod cartesian {
        pub use crate::cartesian::{
            calc_distance, transform_linear_from_origin, transform_linear_to_origin,
        };
    }
    /// The [`Gps`](crate::FrameFamily::Gps) family's operations.
    pub mod gps {
        pub use crate::gps::{
            calc_distance, normalize_linear, transform_linear_from_origin,
            transform_linear_to_origin,
        };
    }
    /// The [`Utm`](crate::FrameFamily::Utm) family's operations.
    pub mod utm {
        pub use crate::utm::{transform_linear_from_origin, transform_linear_to_origin};
    }
    pub use crate::ops::{
        default_normalize_angular, default_normalize_linear, default_normalize_pose,
    };
}
