//! Screen-corner anchoring for controls

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Screen corner a control snaps to, as a combination of edge flags
    ///
    /// Only the four corner combinations are meaningful; the corner
    /// constants below are the ones configs can name.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Anchor: u8 {
        const LEFT = 1;
        const RIGHT = 2;
        const TOP = 4;
        const BOTTOM = 8;
    }
}

impl Anchor {
    pub const LEFT_TOP: Anchor = Anchor::from_bits_retain(Anchor::LEFT.bits() | Anchor::TOP.bits());
    pub const LEFT_BOTTOM: Anchor =
        Anchor::from_bits_retain(Anchor::LEFT.bits() | Anchor::BOTTOM.bits());
    pub const RIGHT_TOP: Anchor =
        Anchor::from_bits_retain(Anchor::RIGHT.bits() | Anchor::TOP.bits());
    pub const RIGHT_BOTTOM: Anchor =
        Anchor::from_bits_retain(Anchor::RIGHT.bits() | Anchor::BOTTOM.bits());

    /// Config name of this anchor, if it is one of the four corners
    pub fn corner_name(self) -> Option<&'static str> {
        if self == Self::LEFT_TOP {
            Some("left_top")
        } else if self == Self::LEFT_BOTTOM {
            Some("left_bottom")
        } else if self == Self::RIGHT_TOP {
            Some("right_top")
        } else if self == Self::RIGHT_BOTTOM {
            Some("right_bottom")
        } else {
            None
        }
    }

    /// Parses a corner name as used in config files
    pub fn from_corner_name(name: &str) -> Option<Self> {
        match name {
            "left_top" => Some(Self::LEFT_TOP),
            "left_bottom" => Some(Self::LEFT_BOTTOM),
            "right_top" => Some(Self::RIGHT_TOP),
            "right_bottom" => Some(Self::RIGHT_BOTTOM),
            _ => None,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::LEFT_BOTTOM
    }
}

impl Serialize for Anchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let name = self
            .corner_name()
            .ok_or_else(|| serde::ser::Error::custom("anchor is not a screen corner"))?;
        serializer.serialize_str(name)
    }
}

impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_corner_name(&name).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown anchor {name:?}, expected one of left_top, left_bottom, right_top, right_bottom"
            ))
        })
    }
}
