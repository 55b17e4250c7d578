use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of coordinate system a frame uses.
///
/// Each family has exactly one [`FrameOps`](crate::FrameOps) table describing how positions,
/// orientations, and poses move into and out of frames of that family. The identity of a family
/// is nothing but its numeric id and name, so it can exist before (and independently of) any
/// knowledge about how to convert between families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FrameFamily {
    /// Right-handed X/Y/Z axes measured in meters.
    Cartesian = 1,
    /// Latitude and longitude in degrees and altitude in meters on the WGS84 ellipsoid.
    #[cfg_attr(feature = "serde", serde(rename = "GPS"))]
    Gps = 2,
    /// Easting, northing, and altitude in meters.
    #[cfg_attr(feature = "serde", serde(rename = "UTM"))]
    Utm = 3,
}

impl FrameFamily {
    /// Every known family, in id order.
    pub const ALL: [FrameFamily; 3] = [FrameFamily::Cartesian, FrameFamily::Gps, FrameFamily::Utm];

    /// Returns the unique numeric id of this family.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns the display name of this family.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FrameFamily::Cartesian => "Cartesian",
            FrameFamily::Gps => "GPS",
            FrameFamily::Utm => "UTM",
        }
    }

    /// Looks up a family by its numeric id.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|family| family.id() == id)
    }

    /// Looks up a family by its name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(name))
    }
}

impl Display for FrameFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::FrameFamily;
    use rstest::rstest;

    #[rstest]
    #[case(FrameFamily::Cartesian, 1, "Cartesian")]
    #[case(FrameFamily::Gps, 2, "GPS")]
    #[case(FrameFamily::Utm, 3, "UTM")]
    fn identities(#[case] family: FrameFamily, #[case] id: u8, #[case] name: &str) {
        assert_eq!(family.id(), id);
        assert_eq!(family.name(), name);
        assert_eq!(family.to_string(), name);
        assert_eq!(FrameFamily::from_id(id), Some(family));
        assert_eq!(FrameFamily::from_name(name), Some(family));
        assert_eq!(FrameFamily::from_name(&name.to_lowercase()), Some(family));
    }

    #[test]
    fn unknown_families() {
        assert_eq!(FrameFamily::from_id(0), None);
        assert_eq!(FrameFamily::from_id(4), None);
        assert_eq!(FrameFamily::from_name("ECEF"), None);
        assert_eq!(FrameFamily::from_name(""), None);
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in FrameFamily::ALL.iter().enumerate() {
            for b in &FrameFamily::ALL[i + 1..] {
                assert_ne!(a.id(), b.id());
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_display_names() {
        assert_eq!(serde_yaml::to_string(&FrameFamily::Gps).unwrap().trim(), "GPS");
        let family: FrameFamily = serde_yaml::from_str("Cartesian").unwrap();
        assert_eq!(family, FrameFamily::Cartesian);
    }
}
