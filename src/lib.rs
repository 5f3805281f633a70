pub mod generator;
pub mod meshing;
pub mod perf;
pub mod region;
/// Chunk region store and greedy mesher for a streaming voxel world
/// A fixed window of chunks follows a moving origin in one flat arena;
/// the mesher turns the window into bit-packed GPU buffers
pub mod voxel;

pub use generator::{PerlinTerrain, TerrainFill};
pub use meshing::{GreedyMesher, MeshingWorkspace, PackedVertex, RegionMesh, MAX_RENDER_DISTANCE};
pub use perf::{CounterSnapshot, FunctionCounters, FUNCTION_COUNTERS};
pub use region::{Region, RegionError, DEFAULT_RENDER_DISTANCE};
pub use voxel::{BlockId, Chunk, ChunkMut, ChunkPos, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH};
