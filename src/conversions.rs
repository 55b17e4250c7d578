//! Explicit paths between frame families.
//!
//! Not every pair of frame families can be converted between: a GPS origin can anchor a Cartesian
//! frame through the local tangent plane, but there is no meaningful way to put a GPS frame inside
//! a Cartesian one. This module keeps that knowledge in one table keyed by `(this, origin)` so
//! that a new family can become reachable by registering a path, without touching the tables of
//! the existing families.
//!
//! The registry is a separate layer from the [`FrameOps`] tables: the tables only
//! know their own family, and the registry is built (lazily, on first use) once they all exist.

use crate::coordinates::{Pose, Position};
use crate::error::{Direction, UndefinedTransform};
use crate::family::FrameFamily;
use crate::geodetic::{GeodeticConverter, Wgs84};
use crate::ops::FrameOps;
use crate::rotation::orient_linear_vec;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Moves a position across a family boundary, given the child frame's pose in its origin and
/// whether the child frame is fixed.
pub type PathFn = fn(&Pose, &mut Position, bool);

/// A registered way to move positions between frames of family `this` and origins of family
/// `origin`.
#[derive(Clone, Copy)]
pub struct ConversionPath {
    pub this: FrameFamily,
    pub origin: FrameFamily,
    pub to_origin: PathFn,
    pub from_origin: PathFn,
}

impl fmt::Debug for ConversionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionPath")
            .field("this", &self.this)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// How a single hop will be carried out.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// Nothing to do: same family, and the frame sits at its origin's zero with no rotation.
    ///
    /// Only [`FrameHop::resolve`](crate::FrameHop::resolve) produces this, since the registry
    /// never sees the frame's pose.
    Identity,
    /// Both frames are of the same family, so the family's own rigid transform applies.
    SameFamily,
    /// A registered cross-family path applies.
    Registered(&'a ConversionPath),
}

static INSTALLED: OnceLock<ConversionRegistry> = OnceLock::new();

/// The set of known cross-family paths.
#[derive(Debug, Clone, Default)]
pub struct ConversionRegistry {
    paths: HashMap<(FrameFamily, FrameFamily), ConversionPath>,
}

impl ConversionRegistry {
    /// Constructs a registry without any paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a registry with the paths this crate knows about, which is currently only
    /// Cartesian frames inside GPS origins.
    #[must_use]
    pub fn with_builtin_paths() -> Self {
        let mut registry = Self::new();
        registry.register(ConversionPath {
            this: FrameFamily::Cartesian,
            origin: FrameFamily::Gps,
            to_origin: cartesian_to_gps,
            from_origin: gps_to_cartesian,
        });
        registry
    }

    /// Makes this registry the one every [`FrameOps`] table dispatches cross-family hops through.
    ///
    /// This can happen at most once per process, and only before the first cross-family hop (or
    /// call to [`ConversionRegistry::global`]). Otherwise the registry is handed back and the one
    /// already in use stays put. Start from [`ConversionRegistry::with_builtin_paths`] to keep
    /// the paths this crate ships with.
    ///
    /// ```
    /// use refframe::{ConversionPath, ConversionRegistry, FrameFamily, FrameOps, Pose, Position};
    ///
    /// // pretend UTM easting/northing are meters east/north of some shared datum
    /// fn utm_to_cartesian(_: &Pose, p: &mut Position, _: bool) {
    ///     *p = Position::new(p.y, p.x, -p.z);
    /// }
    ///
    /// let mut registry = ConversionRegistry::with_builtin_paths();
    /// registry.register(ConversionPath {
    ///     this: FrameFamily::Utm,
    ///     origin: FrameFamily::Cartesian,
    ///     to_origin: utm_to_cartesian,
    ///     from_origin: utm_to_cartesian,
    /// });
    /// registry.install().expect("nothing has used the registry yet");
    ///
    /// let mut p = Position::new(1., 2., 3.);
    /// FrameOps::utm()
    ///     .transform_linear_to_origin(FrameOps::cartesian(), &Pose::ZERO, &mut p, true)
    ///     .expect("UTM frames can now live in Cartesian origins");
    /// assert_eq!(p, Position::new(2., 1., -3.));
    /// ```
    pub fn install(self) -> Result<(), ConversionRegistry> {
        let result = INSTALLED.set(self);
        if result.is_ok() {
            tracing::debug!(
                paths = INSTALLED.get().map_or(0, |registry| registry.paths.len()),
                "installed conversion registry"
            );
        }
        result
    }

    /// Returns the process-wide registry used by the [`FrameOps`] tables.
    ///
    /// This is whatever was [installed](ConversionRegistry::install), or the
    /// [built-in paths](ConversionRegistry::with_builtin_paths) if nothing was installed before
    /// first use.
    pub fn global() -> &'static ConversionRegistry {
        INSTALLED.get_or_init(Self::with_builtin_paths)
    }

    /// Adds `path`, returning the path it replaces for the same pair of families, if any.
    pub fn register(&mut self, path: ConversionPath) -> Option<ConversionPath> {
        self.paths.insert((path.this, path.origin), path)
    }

    /// Returns the path from frames of family `this` into origins of family `origin`.
    #[must_use]
    pub fn find(&self, this: FrameFamily, origin: FrameFamily) -> Option<&ConversionPath> {
        self.paths.get(&(this, origin))
    }

    /// Decides how to get between frames of family `this` and origins of family `origin`.
    ///
    /// The same family always resolves to [`Resolution::SameFamily`], even if a path happens to
    /// be registered for it, so that same-family hops never leave their family.
    pub fn resolve(
        &self,
        this: FrameFamily,
        origin: FrameFamily,
        direction: Direction,
    ) -> Result<Resolution<'_>, UndefinedTransform> {
        if this == origin {
            return Ok(Resolution::SameFamily);
        }
        self.find(this, origin)
            .map(Resolution::Registered)
            .ok_or_else(|| UndefinedTransform::new(this, origin, direction))
    }
}

/// Runs the registered to-origin path from `this` into `origin`.
///
/// The family tables call this for every origin that is not of their own family.
pub(crate) fn linear_to_origin(
    origin: &FrameOps,
    this: &FrameOps,
    frame: &Pose,
    position: &mut Position,
    fixed: bool,
) -> Result<(), UndefinedTransform> {
    let path = ConversionRegistry::global()
        .find(this.family(), origin.family())
        .ok_or_else(|| {
            UndefinedTransform::new(this.family(), origin.family(), Direction::ToOrigin)
        })?;
    (path.to_origin)(frame, position, fixed);
    Ok(())
}

/// Runs the registered from-origin path from `origin` into `this`.
pub(crate) fn linear_from_origin(
    origin: &FrameOps,
    this: &FrameOps,
    frame: &Pose,
    position: &mut Position,
    fixed: bool,
) -> Result<(), UndefinedTransform> {
    let path = ConversionRegistry::global()
        .find(this.family(), origin.family())
        .ok_or_else(|| {
            UndefinedTransform::new(this.family(), origin.family(), Direction::FromOrigin)
        })?;
    (path.from_origin)(frame, position, fixed);
    Ok(())
}

/// Cartesian frame → GPS origin.
///
/// The frame's position in the origin is its geodetic anchor `(lat, lon, alt)`, and its axes are
/// North-East-Down at that anchor once its orientation has been applied.
fn cartesian_to_gps(frame: &Pose, position: &mut Position, fixed: bool) {
    let mut p = *position;
    orient_linear_vec(&mut p, &frame.orientation, false);

    if fixed {
        let anchor = frame.position;
        let converter =
            GeodeticConverter::new(Wgs84::from_degrees_and_meters(anchor.x, anchor.y, anchor.z));
        let (lat, lon, alt) = converter
            .ned_to_geodetic(p.x, p.y, p.z)
            .to_degrees_and_meters();
        tracing::trace!(%anchor, local = %p, lat, lon, alt, "local NED to geodetic");
        p = Position::new(lat, lon, alt);
        // NOTE: normalized on the way out here, but on the way in for the opposite direction, so
        // that it is always the geodetic side that gets canonicalized. without `fixed` the value
        // is still a NED offset in meters and must not be wrapped as though it were lat/lon.
        FrameOps::gps().normalize_linear(&mut p);
    }

    *position = p;
}

/// GPS origin → Cartesian frame; the inverse of [`cartesian_to_gps`].
fn gps_to_cartesian(frame: &Pose, position: &mut Position, fixed: bool) {
    let mut p = *position;

    if fixed {
        FrameOps::gps().normalize_linear(&mut p);
        let anchor = frame.position;
        let converter =
            GeodeticConverter::new(Wgs84::from_degrees_and_meters(anchor.x, anchor.y, anchor.z));
        let (north, east, down) =
            converter.geodetic_to_ned(&Wgs84::from_degrees_and_meters(p.x, p.y, p.z));
        tracing::trace!(%anchor, geodetic = %p, north, east, down, "geodetic to local NED");
        p = Position::new(north, east, down);
    }

    orient_linear_vec(&mut p, &frame.orientation, true);
    *position = p;
}

#[cfg(test)]
mod tests {
    use super::{ConversionPath, ConversionRegistry, Resolution};
    use crate::coordinates::{Orientation, Pose, Position};
    use crate::error::Direction;
    use crate::family::FrameFamily;
    use crate::ops::FrameOps;
    use approx::assert_abs_diff_eq;
    use quickcheck::quickcheck;
    use rstest::rstest;

    fn cartesian() -> &'static FrameOps {
        FrameOps::cartesian()
    }

    fn gps() -> &'static FrameOps {
        FrameOps::gps()
    }

    #[test]
    fn ten_meters_north_of_an_anchor() {
        let frame = Pose::from_components(40., -79., 300., 0., 0., 0.);
        let mut p = Position::new(10., 0., 0.);
        cartesian()
            .transform_linear_to_origin(gps(), &frame, &mut p, true)
            .unwrap();
        assert_abs_diff_eq!(p.x - 40., 9e-5, epsilon = 1e-4);
        assert!(p.x > 40.);
        assert_abs_diff_eq!(p.y, -79., epsilon = 1e-9);
        assert_abs_diff_eq!(p.z, 300., epsilon = 1e-3);

        cartesian()
            .transform_linear_from_origin(gps(), &frame, &mut p, true)
            .unwrap();
        assert_abs_diff_eq!(p, Position::new(10., 0., 0.), epsilon = 1e-3);
    }

    #[test]
    fn orientation_applies_before_projection() {
        // a frame yawed 90° from NED: its X axis points east
        let frame = Pose::from_components(40., -79., 300., 0., 0., std::f64::consts::FRAC_PI_2);
        let mut p = Position::new(10., 0., 0.);
        cartesian()
            .transform_linear_to_origin(gps(), &frame, &mut p, true)
            .unwrap();
        assert_abs_diff_eq!(p.x, 40., epsilon = 1e-8);
        assert!(p.y > -79.);
    }

    #[test]
    fn gps_results_are_normalized() {
        // an anchor given with an out-of-range longitude still yields a canonical result
        let frame = Pose::from_components(40., 281., 300., 0., 0., 0.);
        let mut p = Position::new(10., 0., 0.);
        cartesian()
            .transform_linear_to_origin(gps(), &frame, &mut p, true)
            .unwrap();
        assert_abs_diff_eq!(p.y, -79., epsilon = 1e-9);
    }

    #[test]
    fn geodetic_inputs_are_normalized_before_conversion() {
        let frame = Pose::from_components(40., -79., 300., 0., 0., 0.);
        let mut canonical = Position::new(40.0001, -79., 300.);
        let mut wrapped = Position::new(40.0001, 281., 300.);
        for p in [&mut canonical, &mut wrapped] {
            cartesian()
                .transform_linear_from_origin(gps(), &frame, p, true)
                .unwrap();
        }
        assert_abs_diff_eq!(canonical, wrapped, epsilon = 1e-6);
    }

    #[test]
    fn non_fixed_frames_only_rotate_into_gps_origins() {
        // without a fixed anchor there is no geodetic location to speak of, so the offset stays in
        // meters and must come through untouched by lat/lon wrapping
        let frame = Pose::from_components(40., -79., 300., 0., 0., 0.);
        for p in [Position::new(100., 0., 0.), Position::new(-500., 2_000., 35.)] {
            let mut q = p;
            cartesian()
                .transform_linear_to_origin(gps(), &frame, &mut q, false)
                .unwrap();
            assert_eq!(q, p);
            cartesian()
                .transform_linear_from_origin(gps(), &frame, &mut q, false)
                .unwrap();
            assert_eq!(q, p);
        }

        let yawed = Pose::from_components(40., -79., 300., 0., 0., std::f64::consts::FRAC_PI_2);
        let mut q = Position::new(100., 0., 0.);
        cartesian()
            .transform_linear_to_origin(gps(), &yawed, &mut q, false)
            .unwrap();
        assert_abs_diff_eq!(q, Position::new(0., 100., 0.), epsilon = 1e-12);
    }

    fn try_gps_roundtrip(
        anchor: (f64, f64, f64),
        orientation: Orientation,
        p: Position,
        fixed: bool,
    ) {
        let frame = Pose::new(Position::new(anchor.0, anchor.1, anchor.2), orientation);
        let mut q = p;
        cartesian()
            .transform_linear_to_origin(gps(), &frame, &mut q, fixed)
            .unwrap();
        cartesian()
            .transform_linear_from_origin(gps(), &frame, &mut q, fixed)
            .unwrap();
        assert_abs_diff_eq!(q, p, epsilon = 1e-6);
    }

    quickcheck! {
        fn cartesian_gps_roundtrip(orientation: Orientation, p: Position, fixed: bool) -> () {
            for anchor in [(40., -79., 300.), (-33.9, 151.2, 0.), (0., 179.9, -20.), (71., 25.8, 1500.)] {
                try_gps_roundtrip(anchor, orientation, p, fixed);
            }
        }
    }

    #[rstest]
    #[case(FrameFamily::Cartesian, FrameFamily::Cartesian, true)]
    #[case(FrameFamily::Gps, FrameFamily::Gps, true)]
    #[case(FrameFamily::Cartesian, FrameFamily::Gps, true)]
    #[case(FrameFamily::Gps, FrameFamily::Cartesian, false)]
    #[case(FrameFamily::Cartesian, FrameFamily::Utm, false)]
    #[case(FrameFamily::Utm, FrameFamily::Cartesian, false)]
    #[case(FrameFamily::Utm, FrameFamily::Gps, false)]
    fn builtin_resolution(
        #[case] this: FrameFamily,
        #[case] origin: FrameFamily,
        #[case] defined: bool,
    ) {
        let registry = ConversionRegistry::global();
        for direction in [Direction::ToOrigin, Direction::FromOrigin] {
            match registry.resolve(this, origin, direction) {
                Ok(Resolution::SameFamily) => assert_eq!(this, origin),
                Ok(Resolution::Registered(path)) => {
                    assert!(defined);
                    assert_eq!((path.this, path.origin), (this, origin));
                }
                Ok(Resolution::Identity) => panic!("the registry never sees poses"),
                Err(err) => {
                    assert!(!defined);
                    assert_eq!(err.this_family(), this);
                    assert_eq!(err.origin_family(), origin);
                    assert_eq!(err.direction(), direction);
                }
            }
        }
    }

    #[test]
    fn registering_replaces() {
        fn nothing(_: &Pose, _: &mut Position, _: bool) {}

        let mut registry = ConversionRegistry::new();
        assert!(registry.find(FrameFamily::Utm, FrameFamily::Gps).is_none());
        let path = ConversionPath {
            this: FrameFamily::Utm,
            origin: FrameFamily::Gps,
            to_origin: nothing,
            from_origin: nothing,
        };
        assert!(registry.register(path).is_none());
        assert!(registry.register(path).is_some());
        assert!(matches!(
            registry.resolve(FrameFamily::Utm, FrameFamily::Gps, Direction::ToOrigin),
            Ok(Resolution::Registered(_))
        ));
        // registering one direction of a pair does not make the reverse pair reachable
        assert!(registry
            .resolve(FrameFamily::Gps, FrameFamily::Utm, Direction::ToOrigin)
            .is_err());
    }
}
