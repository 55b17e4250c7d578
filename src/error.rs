use crate::family::FrameFamily;
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which way a single hop between a frame and its origin goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// From a frame into its origin.
    ToOrigin,
    /// From an origin into one of its child frames.
    FromOrigin,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::ToOrigin => "to origin",
            Direction::FromOrigin => "from origin",
        })
    }
}

/// No conversion is known between a frame's family and the family of its origin.
///
/// This is never a transient condition: it means a frame was placed directly inside an origin it
/// cannot be expressed in. Either fix the frame graph or route through an intermediate frame that
/// both families can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("undefined transform {direction}: no path from {this} to {origin}")]
pub struct UndefinedTransform {
    this: FrameFamily,
    origin: FrameFamily,
    direction: Direction,
}

impl UndefinedTransform {
    #[must_use]
    pub fn new(this: FrameFamily, origin: FrameFamily, direction: Direction) -> Self {
        tracing::debug!(%this, %origin, %direction, "no transform path registered");
        Self {
            this,
            origin,
            direction,
        }
    }

    /// The family of the frame whose coordinates were being transformed.
    #[must_use]
    pub fn this_family(&self) -> FrameFamily {
        self.this
    }

    /// The family of the origin frame.
    #[must_use]
    pub fn origin_family(&self) -> FrameFamily {
        self.origin
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}
