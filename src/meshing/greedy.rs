/// Greedy mesher: voxel chunks to merged-quad triangle meshes
/// Sweeps each of the three axes in turn. For every slice plane it builds a
/// 2D mask of visible faces, then merges runs of identical cells into maximal
/// rectangles, row-major: grow right as far as the row matches, then grow down
/// while every row below matches the full width. Merged quads carry their
/// dimensions in the texture coordinates so the fragment shader can tile.
///
/// Faces are emitted only between a solid voxel and an empty one. Voxels
/// outside the chunk count as empty, so chunk boundary faces are always
/// emitted and chunks can be meshed independently (and in parallel).
#[cfg(feature = "profiling")]
use crate::perf::FUNCTION_COUNTERS;
use crate::region::Region;
use crate::voxel::{BlockId, Chunk, ChunkPos, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::{count_add, count_call};

use super::vertex::PackedVertex;

use crate::generator::TerrainFill;
use rayon::prelude::*;

/// Voxel extent along each sweep axis: x, y horizontal, z vertical.
const EXTENTS: [usize; 3] = [CHUNK_WIDTH, CHUNK_WIDTH, CHUNK_HEIGHT];

/// Largest slice mask needed by any axis.
const MAX_MASK_LEN: usize = CHUNK_WIDTH * CHUNK_HEIGHT;

/// One visible face in a slice mask. Cells merge only when equal, so a quad
/// never spans different blocks or mixed orientations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceCell {
    pub block: BlockId,
    /// True when the face's normal points toward the negative sweep axis.
    pub backface: bool,
}

/// A maximal rectangle found in a slice mask, in mask coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaskQuad {
    pub u: usize,
    pub v: usize,
    pub width: usize,
    pub height: usize,
    pub cell: FaceCell,
}

/// Scratch buffers reused across chunks so the per-slice mask and quad list
/// are allocated once per meshing thread, not once per slice.
pub struct MeshingWorkspace {
    mask: Vec<Option<FaceCell>>,
    quads: Vec<MaskQuad>,
}

impl MeshingWorkspace {
    pub fn new() -> Self {
        Self {
            mask: vec![None; MAX_MASK_LEN],
            quads: Vec::with_capacity(256),
        }
    }
}

impl Default for MeshingWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined mesh for a whole region, in render-area-local voxel coordinates
/// (origin at the window's corner chunk, so all positions are non-negative
/// and fit the vertex encoding).
#[derive(Clone, Debug, Default)]
pub struct RegionMesh {
    pub vertices: Vec<PackedVertex>,
    pub indices: Vec<u32>,
    /// Chunk whose (0, 0) voxel column is the coordinate origin.
    pub corner: ChunkPos,
}

impl RegionMesh {
    pub fn new(corner: ChunkPos) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            corner,
        }
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append another mesh's buffers, rebasing its indices past our vertices.
    pub fn merge(&mut self, other: &RegionMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }
}

pub struct GreedyMesher;

impl GreedyMesher {
    /// Mesh every chunk in the region into one buffer pair, serially.
    pub fn mesh_region<G: TerrainFill>(region: &Region<G>) -> RegionMesh {
        crate::perf_scope!("mesh_region");
        let mut mesh = RegionMesh::new(region.corner());
        let mut workspace = MeshingWorkspace::new();
        for chunk in region.chunks() {
            Self::mesh_chunk(chunk, &mut workspace, &mut mesh);
        }
        log::debug!(
            "meshed region at origin {}: {} quads, {} vertices",
            region.origin(),
            mesh.quad_count(),
            mesh.vertices.len()
        );
        mesh
    }

    /// Parallel variant: chunks are independent (boundaries sample as empty),
    /// so each is meshed on its own and the buffers are stitched in window
    /// order. Output is identical to `mesh_region`.
    pub fn mesh_region_parallel<G: TerrainFill + Sync>(region: &Region<G>) -> RegionMesh {
        crate::perf_scope!("mesh_region_parallel");
        let corner = region.corner();
        let parts: Vec<RegionMesh> = region
            .positions()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map_init(MeshingWorkspace::new, |workspace, pos| {
                let mut part = RegionMesh::new(corner);
                Self::mesh_chunk(region.chunk_at(pos), workspace, &mut part);
                part
            })
            .collect();

        let mut mesh = RegionMesh::new(corner);
        for part in &parts {
            mesh.merge(part);
        }
        mesh
    }

    /// Mesh a single chunk, appending into `mesh`. The chunk's offset inside
    /// the render area comes from its position relative to `mesh.corner`.
    pub fn mesh_chunk(chunk: Chunk<'_>, workspace: &mut MeshingWorkspace, mesh: &mut RegionMesh) {
        count_call!(FUNCTION_COUNTERS.mesh_chunk_calls);

        let offset = chunk.position().as_ivec2() - mesh.corner.as_ivec2();
        debug_assert!(
            offset.min_element() >= 0,
            "chunk {} lies outside render area cornered at {}",
            chunk.position(),
            mesh.corner
        );
        let base = [
            offset.x as u32 * CHUNK_WIDTH as u32,
            offset.y as u32 * CHUNK_WIDTH as u32,
            0,
        ];

        for axis in 0..3 {
            Self::mesh_axis(chunk, axis, base, workspace, mesh);
        }
    }

    fn mesh_axis(
        chunk: Chunk<'_>,
        axis: usize,
        base: [u32; 3],
        workspace: &mut MeshingWorkspace,
        mesh: &mut RegionMesh,
    ) {
        let u_axis = (axis + 1) % 3;
        let v_axis = (axis + 2) % 3;
        let width = EXTENTS[u_axis];
        let height = EXTENTS[v_axis];
        let mask = &mut workspace.mask[..width * height];

        // One extra slice so the far boundary faces are visited.
        for slice in 0..=EXTENTS[axis] {
            count_call!(FUNCTION_COUNTERS.mask_build_calls);
            for v in 0..height {
                for u in 0..width {
                    mask[v * width + u] = Self::sample_face(chunk, axis, slice, u, v);
                }
            }

            workspace.quads.clear();
            merge_mask(mask, width, height, &mut workspace.quads);
            count_add!(FUNCTION_COUNTERS.quads_emitted, workspace.quads.len() as u64);

            for &quad in &workspace.quads {
                Self::emit_quad(mesh, axis, slice, base, quad);
            }
        }
    }

    /// Face visible at the boundary between slice `slice - 1` (back) and
    /// `slice` (front), looking along `axis`. Exactly one side must be solid;
    /// positions outside the chunk count as empty.
    #[inline]
    fn sample_face(
        chunk: Chunk<'_>,
        axis: usize,
        slice: usize,
        u: usize,
        v: usize,
    ) -> Option<FaceCell> {
        let u_axis = (axis + 1) % 3;
        let v_axis = (axis + 2) % 3;

        let voxel_at = |along: usize| {
            let mut pos = [0usize; 3];
            pos[axis] = along;
            pos[u_axis] = u;
            pos[v_axis] = v;
            chunk.get(pos[0], pos[1], pos[2])
        };

        let front = if slice < EXTENTS[axis] {
            voxel_at(slice)
        } else {
            BlockId::Empty
        };
        let back = if slice > 0 {
            voxel_at(slice - 1)
        } else {
            BlockId::Empty
        };

        match (back.is_solid(), front.is_solid()) {
            // Back voxel faces forward along +axis.
            (true, false) => Some(FaceCell {
                block: back,
                backface: false,
            }),
            // Front voxel faces backward along -axis.
            (false, true) => Some(FaceCell {
                block: front,
                backface: true,
            }),
            _ => None,
        }
    }

    fn emit_quad(mesh: &mut RegionMesh, axis: usize, slice: usize, base: [u32; 3], quad: MaskQuad) {
        let u_axis = (axis + 1) % 3;
        let v_axis = (axis + 2) % 3;

        let mut origin = base;
        origin[axis] += slice as u32;
        origin[u_axis] += quad.u as u32;
        origin[v_axis] += quad.v as u32;

        let mut du = [0u32; 3];
        du[u_axis] = quad.width as u32;
        let mut dv = [0u32; 3];
        dv[v_axis] = quad.height as u32;

        let corners = [
            origin,
            [origin[0] + du[0], origin[1] + du[1], origin[2] + du[2]],
            [
                origin[0] + du[0] + dv[0],
                origin[1] + du[1] + dv[1],
                origin[2] + du[2] + dv[2],
            ],
            [origin[0] + dv[0], origin[1] + dv[1], origin[2] + dv[2]],
        ];
        // Quad dimensions ride along in the texture coordinates so the shader
        // can tile the block texture across the merged face.
        let tex = [
            (0, 0),
            (quad.width as u32, 0),
            (quad.width as u32, quad.height as u32),
            (0, quad.height as u32),
        ];

        let first = mesh.vertices.len() as u32;
        for (corner, (tu, tv)) in corners.iter().zip(tex) {
            mesh.vertices.push(PackedVertex::new(
                corner[0],
                corner[1],
                corner[2],
                tu,
                tv,
                quad.cell.block,
            ));
        }

        // Counter-clockwise when viewed from the face's normal side.
        let winding: [u32; 6] = if quad.cell.backface {
            [0, 2, 1, 0, 3, 2]
        } else {
            [0, 1, 2, 0, 2, 3]
        };
        mesh.indices.extend(winding.iter().map(|i| first + i));
    }
}

/// Merge a slice mask into maximal rectangles of identical cells. Consumes
/// the mask (merged cells are cleared) and appends to `quads`. Every visible
/// cell ends up in exactly one quad.
pub fn merge_mask(
    mask: &mut [Option<FaceCell>],
    width: usize,
    height: usize,
    quads: &mut Vec<MaskQuad>,
) {
    debug_assert_eq!(mask.len(), width * height);

    let mut v = 0;
    while v < height {
        let mut u = 0;
        while u < width {
            let Some(cell) = mask[v * width + u] else {
                u += 1;
                continue;
            };

            let mut quad_width = 1;
            while u + quad_width < width && mask[v * width + u + quad_width] == Some(cell) {
                quad_width += 1;
            }

            let mut quad_height = 1;
            'grow: while v + quad_height < height {
                for du in 0..quad_width {
                    if mask[(v + quad_height) * width + u + du] != Some(cell) {
                        break 'grow;
                    }
                }
                quad_height += 1;
            }

            for dv in 0..quad_height {
                for du in 0..quad_width {
                    mask[(v + dv) * width + u + du] = None;
                }
            }

            quads.push(MaskQuad {
                u,
                v,
                width: quad_width,
                height: quad_height,
                cell,
            });
            u += quad_width;
        }
        v += 1;
    }
}
