/// Chunk views over region-owned voxel storage
/// A chunk is a fixed 16x16x256 column of voxels; the region store owns the
/// backing memory and hands out these non-owning views, so recentering can
/// reuse storage without copies.
use super::{BlockId, ChunkPos};

pub const CHUNK_WIDTH: usize = 16;
pub const CHUNK_HEIGHT: usize = 256;
pub const CHUNK_VOLUME: usize = CHUNK_WIDTH * CHUNK_WIDTH * CHUNK_HEIGHT;

/// Convert local coordinates to a flat index.
/// Layout is x-major, then y, with z contiguous: whole vertical runs of a
/// column sit next to each other, which is what the mesher's z-axis sweep
/// wants for cache locality.
#[inline]
pub const fn block_index(x: usize, y: usize, z: usize) -> usize {
    (CHUNK_WIDTH * CHUNK_HEIGHT * x) + (CHUNK_HEIGHT * y) + z
}

/// Convert a flat index back to local coordinates.
#[inline]
pub const fn block_coords(index: usize) -> (usize, usize, usize) {
    let x = index / (CHUNK_WIDTH * CHUNK_HEIGHT);
    let remainder = index % (CHUNK_WIDTH * CHUNK_HEIGHT);
    let y = remainder / CHUNK_HEIGHT;
    let z = remainder % CHUNK_HEIGHT;
    (x, y, z)
}

/// Read-only view of one chunk's voxels.
/// Out-of-range coordinates are a programmer error (fatal in debug builds).
#[derive(Copy, Clone)]
pub struct Chunk<'a> {
    position: ChunkPos,
    blocks: &'a [BlockId],
}

impl<'a> Chunk<'a> {
    #[inline]
    pub fn new(position: ChunkPos, blocks: &'a [BlockId]) -> Self {
        debug_assert_eq!(blocks.len(), CHUNK_VOLUME);
        Self { position, blocks }
    }

    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    /// Get the block at local coordinates (0..16, 0..16, 0..256).
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        debug_assert!(x < CHUNK_WIDTH && y < CHUNK_WIDTH && z < CHUNK_HEIGHT);
        self.blocks[block_index(x, y, z)]
    }

    /// Get the block at a flat index.
    #[inline]
    pub fn get_index(&self, index: usize) -> BlockId {
        debug_assert!(index < CHUNK_VOLUME);
        self.blocks[index]
    }

    /// Direct access to the backing slice for hot-path scans.
    #[inline]
    pub fn blocks(&self) -> &'a [BlockId] {
        self.blocks
    }
}

/// Mutable view of one chunk's voxels, handed to the terrain generator when a
/// slot is (re)populated.
pub struct ChunkMut<'a> {
    position: ChunkPos,
    blocks: &'a mut [BlockId],
}

impl<'a> ChunkMut<'a> {
    #[inline]
    pub fn new(position: ChunkPos, blocks: &'a mut [BlockId]) -> Self {
        debug_assert_eq!(blocks.len(), CHUNK_VOLUME);
        Self { position, blocks }
    }

    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        debug_assert!(x < CHUNK_WIDTH && y < CHUNK_WIDTH && z < CHUNK_HEIGHT);
        self.blocks[block_index(x, y, z)]
    }

    /// Set the block at local coordinates.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: BlockId) {
        debug_assert!(x < CHUNK_WIDTH && y < CHUNK_WIDTH && z < CHUNK_HEIGHT);
        self.blocks[block_index(x, y, z)] = block;
    }

    /// Fill every voxel with the same block.
    #[inline]
    pub fn fill(&mut self, block: BlockId) {
        self.blocks.fill(block);
    }

    /// Reborrow as a read-only view.
    #[inline]
    pub fn as_chunk(&self) -> Chunk<'_> {
        Chunk::new(self.position, self.blocks)
    }
}
