/// Terrain generation seam
/// The region store never knows how voxels get their values; it hands a
/// mutable chunk view to a `TerrainFill` whenever a slot is (re)populated.
/// Fills must be deterministic per chunk position so that regenerating a
/// previously visited chunk reproduces its content exactly.
use crate::voxel::{BlockId, ChunkMut, CHUNK_HEIGHT, CHUNK_WIDTH};
use noise::{NoiseFn, Perlin};

/// Injected pure fill function. Must leave every voxel slot set to a valid
/// `BlockId` (the view is pre-cleared to `Empty` only on first allocation,
/// not on reuse).
pub trait TerrainFill {
    fn fill(&self, chunk: &mut ChunkMut<'_>);
}

/// Plain functions and non-capturing closures work as generators directly.
impl<F> TerrainFill for F
where
    F: Fn(&mut ChunkMut<'_>),
{
    #[inline]
    fn fill(&self, chunk: &mut ChunkMut<'_>) {
        self(chunk)
    }
}

/// Default heightmap terrain driven by 2D Perlin noise.
pub struct PerlinTerrain {
    perlin: Perlin,
}

/// Water fills everything below this height where no ground exists.
const SEA_LEVEL: i32 = 64;
/// Surfaces above this height are snow-capped.
const SNOW_LINE: i32 = 96;
const BASE_HEIGHT: f64 = 64.0;
const HEIGHT_AMPLITUDE: f64 = 28.0;
const NOISE_SCALE: f64 = 0.01;

impl PerlinTerrain {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Terrain surface height at a world column, clamped inside the chunk's
    /// vertical extent so the fill loop never indexes out of range.
    #[inline]
    fn surface_height(&self, world_x: i32, world_y: i32) -> i32 {
        let noise = self.perlin.get([
            world_x as f64 * NOISE_SCALE,
            world_y as f64 * NOISE_SCALE,
        ]);
        let height = (BASE_HEIGHT + noise * HEIGHT_AMPLITUDE) as i32;
        height.clamp(1, CHUNK_HEIGHT as i32 - 1)
    }

    #[inline]
    fn surface_block(height: i32) -> BlockId {
        if height >= SNOW_LINE {
            BlockId::Snow
        } else if height <= SEA_LEVEL + 1 {
            BlockId::Sand
        } else {
            BlockId::Grass
        }
    }
}

impl TerrainFill for PerlinTerrain {
    fn fill(&self, chunk: &mut ChunkMut<'_>) {
        let pos = chunk.position();
        let base_x = pos.x * CHUNK_WIDTH as i32;
        let base_y = pos.y * CHUNK_WIDTH as i32;

        for lx in 0..CHUNK_WIDTH {
            for ly in 0..CHUNK_WIDTH {
                let height = self.surface_height(base_x + lx as i32, base_y + ly as i32);
                let surface = Self::surface_block(height);

                for lz in 0..CHUNK_HEIGHT {
                    let z = lz as i32;
                    let block = if z == 0 {
                        BlockId::Bedrock
                    } else if z < height - 3 {
                        BlockId::Stone
                    } else if z < height {
                        BlockId::Dirt
                    } else if z == height {
                        surface
                    } else if z <= SEA_LEVEL {
                        BlockId::Water
                    } else {
                        BlockId::Empty
                    };
                    chunk.set(lx, ly, lz, block);
                }
            }
        }
    }
}
