//! Panel options.

/// Logical rotation or mirroring of the image relative to the panel's native
/// pixel addressing.
///
/// The discriminants are the raw orientation codes used by display subsystems
/// that pass orientation as an integer, see [`Orientation::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum Orientation {
    /// Native addressing.
    #[default]
    Normal = 0,
    /// Rotated 90° clockwise.
    Rotate90 = 1,
    /// Rotated 180°.
    Rotate180 = 2,
    /// Rotated 270° clockwise.
    Rotate270 = 3,
    /// Mirrored horizontally.
    MirrorH = 4,
    /// Mirrored vertically.
    MirrorV = 5,
    /// Mirrored horizontally and vertically.
    MirrorHV = 6,
}

impl Orientation {
    /// All orientations in raw code order.
    pub const ALL: [Orientation; 7] = [
        Orientation::Normal,
        Orientation::Rotate90,
        Orientation::Rotate180,
        Orientation::Rotate270,
        Orientation::MirrorH,
        Orientation::MirrorV,
        Orientation::MirrorHV,
    ];

    /// Decodes a raw orientation code.
    pub const fn from_raw(raw: u16) -> Result<Self, UnrecognizedOrientation> {
        match raw {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Rotate90),
            2 => Ok(Self::Rotate180),
            3 => Ok(Self::Rotate270),
            4 => Ok(Self::MirrorH),
            5 => Ok(Self::MirrorV),
            6 => Ok(Self::MirrorHV),
            _ => Err(UnrecognizedOrientation(raw)),
        }
    }

    /// Returns the raw orientation code.
    pub const fn raw(self) -> u16 {
        self as u16
    }

    /// Returns `true` if rows and columns are exchanged.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

impl TryFrom<u16> for Orientation {
    type Error = UnrecognizedOrientation;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

/// A raw orientation code outside the known range.
///
/// Panel operations never return this: an unknown code is logged and
/// replaced by [`Orientation::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnrecognizedOrientation(pub u16);
