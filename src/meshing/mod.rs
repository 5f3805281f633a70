/// Greedy meshing and the packed vertex format it produces
pub mod greedy;
pub mod vertex;

pub use greedy::{merge_mask, FaceCell, GreedyMesher, MaskQuad, MeshingWorkspace, RegionMesh};
pub use vertex::{EncodingOverflow, PackedVertex, MAX_RENDER_DISTANCE};
