/// Core voxel data types: block identifiers, chunk coordinates, chunk views
pub mod block_id;
pub mod chunk;

pub use block_id::{BlockId, BLOCK_ID_COUNT};
pub use chunk::{
    block_coords, block_index, Chunk, ChunkMut, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH,
};

use glam::IVec2;
use std::fmt;

/// Position of a chunk in the 2D horizontal grid (chunks span the full
/// vertical extent). Packs losslessly into a u64 for hashing and comparison.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

impl ChunkPos {
    pub const ZERO: ChunkPos = ChunkPos { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev (chessboard) distance; the region window is the set of
    /// positions within this distance of the origin. Computed in i64 so
    /// coordinates at opposite ends of the i32 range cannot wrap; distances
    /// beyond i32::MAX saturate.
    #[inline]
    pub fn chebyshev(self, other: ChunkPos) -> i32 {
        let dx = (self.x as i64 - other.x as i64).abs();
        let dy = (self.y as i64 - other.y as i64).abs();
        dx.max(dy).min(i32::MAX as i64) as i32
    }

    /// Pack into a u64: high 32 bits = y, low 32 bits = x.
    #[inline]
    pub const fn packed(self) -> u64 {
        ((self.y as u32 as u64) << 32) | (self.x as u32 as u64)
    }

    /// Invert `packed`.
    #[inline]
    pub const fn from_packed(packed: u64) -> Self {
        Self {
            x: packed as u32 as i32,
            y: (packed >> 32) as u32 as i32,
        }
    }

    #[inline]
    pub const fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub const fn from_ivec2(v: IVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
