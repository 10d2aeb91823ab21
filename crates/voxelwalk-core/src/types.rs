//! Block kinds and their display colors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Display colors indexed by [`BlockKind::id`], as `0xRRGGBB`.
const COLORS: [u32; 7] = [
    0x00_0000, // air
    0x56_7d46, // grass
    0x79_5548, // dirt
    0x80_8080, // stone
    0x40_a4df, // water
    0x5d_4037, // wood
    0x2e_7d32, // leaves
];

const NAMES: [&str; 7] = ["Air", "Grass", "Dirt", "Stone", "Water", "Wood", "Leaves"];

/// The kind of block stored in a single voxel cell.
///
/// `Air` is the absence of solid matter: it is never meshed and never collides.
/// Every other kind is solid for collision and picking, including `Water`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum BlockKind {
    /// Empty space
    #[default]
    Air = 0,
    /// Surface block of every terrain column
    Grass = 1,
    /// Shallow sub-surface layer
    Dirt = 2,
    /// Deep terrain
    Stone = 3,
    /// Fills terrain depressions below sea level
    Water = 4,
    /// Tree trunk block (placeable only)
    Wood = 5,
    /// Tree canopy block (placeable only)
    Leaves = 6,
}

impl BlockKind {
    /// Every block kind, in id order.
    pub const ALL: [Self; 7] = [
        Self::Air,
        Self::Grass,
        Self::Dirt,
        Self::Stone,
        Self::Water,
        Self::Wood,
        Self::Leaves,
    ];

    /// Numeric id of this kind.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns true if this block is air (empty)
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Returns true if this block is solid (not air)
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// Display color as `0xRRGGBB`.
    #[inline]
    #[must_use]
    pub const fn color_hex(self) -> u32 {
        COLORS[self as usize]
    }

    /// Display color as linear `[r, g, b]` in `0.0..=1.0`.
    #[must_use]
    pub fn color_rgb(self) -> [f32; 3] {
        hex_to_rgb(self.color_hex())
    }

    /// Human-readable name, used by the HUD.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        NAMES[self as usize]
    }
}

impl TryFrom<u8> for BlockKind {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(id))
            .copied()
            .ok_or_else(|| Error::InvalidData(format!("unknown block id {id}")))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Split a `0xRRGGBB` value into float channels.
#[must_use]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| f32::from(((hex >> shift) & 0xff) as u8) / 255.0;
    [channel(16), channel(8), channel(0)]
}
