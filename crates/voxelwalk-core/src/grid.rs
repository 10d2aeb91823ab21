//! Block access traits.

use crate::coords::BlockPos;
use crate::types::BlockKind;

/// Read access to blocks by world position.
///
/// Implementations must treat any position they do not store (unloaded
/// chunks, positions above or below the world) as [`BlockKind::Air`].
pub trait BlockSource {
    /// Block at the given world position.
    fn block_at(&self, pos: BlockPos) -> BlockKind;

    /// Returns true if the block at `pos` is not air.
    #[inline]
    fn is_solid_at(&self, pos: BlockPos) -> bool {
        self.block_at(pos).is_solid()
    }
}

/// Read/write access to blocks by world position.
///
/// Writes to positions the grid does not store are silently discarded.
pub trait VoxelGrid: BlockSource {
    /// Replace the block at the given world position.
    fn set_block_at(&mut self, pos: BlockPos, kind: BlockKind);
}

impl<T: BlockSource + ?Sized> BlockSource for &T {
    fn block_at(&self, pos: BlockPos) -> BlockKind {
        (**self).block_at(pos)
    }
}

/// A world with nothing in it.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySpace;

impl BlockSource for EmptySpace {
    #[inline]
    fn block_at(&self, _pos: BlockPos) -> BlockKind {
        BlockKind::Air
    }
}
