/// Chunk region store: a fixed window of loaded chunks around a moving origin
/// Owns one contiguous voxel arena sized for the whole window, allocated once.
/// Chunk slots form a 2D ring buffer addressed by `pos mod window`, so
/// recentering never moves memory: a chunk leaving the window simply has its
/// slot overwritten by the chunk entering on the opposite edge.
use crate::count_call;
use crate::generator::TerrainFill;
use crate::meshing::MAX_RENDER_DISTANCE;
#[cfg(feature = "profiling")]
use crate::perf::FUNCTION_COUNTERS;
use crate::voxel::{BlockId, Chunk, ChunkMut, ChunkPos, CHUNK_VOLUME};
use thiserror::Error;

/// Render distance used when callers have no reason to pick their own.
/// Checked at compile time against the vertex position encoding.
pub const DEFAULT_RENDER_DISTANCE: i32 = 12;
const _: () = assert!(DEFAULT_RENDER_DISTANCE >= 1);
const _: () = assert!(DEFAULT_RENDER_DISTANCE <= MAX_RENDER_DISTANCE);

/// Precondition violations on the region API. The reference design treats
/// these as fatal; they are surfaced as typed errors for testability.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    #[error("chunk {pos} is outside the loaded window (origin {origin}, radius {radius})")]
    OutOfWindow {
        pos: ChunkPos,
        origin: ChunkPos,
        radius: i32,
    },

    #[error("origin may move at most one chunk per step: {from} -> {to}")]
    InvalidOriginStep { from: ChunkPos, to: ChunkPos },
}

/// The streaming chunk window. Generic over the terrain fill so tests can
/// inject instrumented generators; a single long-lived owner passes it by
/// reference to consumers.
pub struct Region<G> {
    origin: ChunkPos,
    radius: i32,
    window: i32,
    /// `window^2 * CHUNK_VOLUME` blocks, never reallocated after construction.
    arena: Vec<BlockId>,
    /// Current occupant of each ring-buffer slot.
    slots: Vec<ChunkPos>,
    generator: G,
}

/// Ring-buffer slot for a chunk position. Each residue pair appears exactly
/// once inside any `window x window` axis-aligned square, so positions in the
/// loaded window map to distinct slots.
#[inline]
fn slot_index(window: i32, pos: ChunkPos) -> usize {
    let sx = pos.x.rem_euclid(window);
    let sy = pos.y.rem_euclid(window);
    (sy * window + sx) as usize
}

impl<G: TerrainFill> Region<G> {
    /// Allocate the arena and fill every chunk in the window around `origin`.
    /// `radius` outside `1..=MAX_RENDER_DISTANCE` is a programmer error.
    pub fn new(origin: ChunkPos, radius: i32, generator: G) -> Self {
        assert!(
            (1..=MAX_RENDER_DISTANCE).contains(&radius),
            "render distance {radius} outside supported range 1..={MAX_RENDER_DISTANCE}"
        );

        crate::perf_scope!("region_new");
        let window = 2 * radius + 1;
        let slot_count = (window * window) as usize;
        let mut region = Self {
            origin,
            radius,
            window,
            arena: vec![BlockId::Empty; slot_count * CHUNK_VOLUME],
            slots: vec![ChunkPos::ZERO; slot_count],
            generator,
        };

        for pos in window_positions(origin, radius) {
            let slot = slot_index(window, pos);
            region.slots[slot] = pos;
            Self::fill_slot(&region.generator, &mut region.arena, slot, pos);
        }

        log::debug!(
            "region initialized at origin {origin}: {slot_count} chunks, radius {radius}"
        );
        region
    }

    #[inline]
    pub fn origin(&self) -> ChunkPos {
        self.origin
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Window edge length in chunks (`2R + 1`).
    #[inline]
    pub fn window(&self) -> i32 {
        self.window
    }

    /// Bottom-left chunk of the window; the mesher's render-area corner.
    #[inline]
    pub fn corner(&self) -> ChunkPos {
        self.origin.offset(-self.radius, -self.radius)
    }

    /// Every loaded chunk position, row-major from the corner.
    pub fn positions(&self) -> impl Iterator<Item = ChunkPos> {
        window_positions(self.origin, self.radius)
    }

    /// Read-only views of every loaded chunk.
    pub fn chunks(&self) -> impl Iterator<Item = Chunk<'_>> {
        self.positions().map(move |pos| self.chunk_at(pos))
    }

    /// Look up the chunk at `pos`. No side effects; positions outside the
    /// window are rejected.
    pub fn get_chunk(&self, pos: ChunkPos) -> Result<Chunk<'_>, RegionError> {
        if self.origin.chebyshev(pos) > self.radius {
            return Err(RegionError::OutOfWindow {
                pos,
                origin: self.origin,
                radius: self.radius,
            });
        }
        Ok(self.chunk_at(pos))
    }

    /// View of a position known to be inside the window.
    #[inline]
    pub(crate) fn chunk_at(&self, pos: ChunkPos) -> Chunk<'_> {
        debug_assert!(self.origin.chebyshev(pos) <= self.radius);
        let slot = slot_index(self.window, pos);
        debug_assert_eq!(self.slots[slot], pos);
        Chunk::new(pos, &self.arena[slot * CHUNK_VOLUME..][..CHUNK_VOLUME])
    }

    /// Shift the window by at most one chunk per axis. Slots whose occupant
    /// changes are regenerated in place; everything else is untouched and no
    /// allocation occurs. A diagonal step evicts one row plus one column
    /// (`2*window - 1` chunks); a repeated origin is a no-op.
    pub fn change_origin(&mut self, new_origin: ChunkPos) -> Result<(), RegionError> {
        if self.origin.chebyshev(new_origin) > 1 {
            return Err(RegionError::InvalidOriginStep {
                from: self.origin,
                to: new_origin,
            });
        }
        if new_origin == self.origin {
            return Ok(());
        }

        let from = self.origin;
        self.origin = new_origin;

        let window = self.window;
        let mut regenerated = 0usize;
        for pos in window_positions(new_origin, self.radius) {
            let slot = slot_index(window, pos);
            if self.slots[slot] != pos {
                self.slots[slot] = pos;
                Self::fill_slot(&self.generator, &mut self.arena, slot, pos);
                regenerated += 1;
            }
        }

        log::debug!(
            "region recentered {from} -> {new_origin}: {regenerated} chunks regenerated"
        );
        Ok(())
    }

    /// Run the terrain fill over one slot's storage.
    fn fill_slot(generator: &G, arena: &mut [BlockId], slot: usize, pos: ChunkPos) {
        count_call!(FUNCTION_COUNTERS.terrain_fill_calls);
        log::trace!("filling chunk {pos} in slot {slot}");
        let blocks = &mut arena[slot * CHUNK_VOLUME..][..CHUNK_VOLUME];
        let mut view = ChunkMut::new(pos, blocks);
        generator.fill(&mut view);
    }
}

fn window_positions(origin: ChunkPos, radius: i32) -> impl Iterator<Item = ChunkPos> {
    (origin.y - radius..=origin.y + radius).flat_map(move |y| {
        (origin.x - radius..=origin.x + radius).map(move |x| ChunkPos::new(x, y))
    })
}
