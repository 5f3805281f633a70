//! Mesher correctness against a brute-force face count, plus serial/parallel
//! agreement over whole regions.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use voxel_region::meshing::{GreedyMesher, MeshingWorkspace, RegionMesh};
use voxel_region::voxel::{BlockId, Chunk, ChunkMut, ChunkPos};
use voxel_region::{PerlinTerrain, Region, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH};

/// Count exposed faces the slow way: every solid voxel contributes one face
/// per empty (or out-of-chunk) neighbor.
fn brute_force_face_count(chunk: Chunk<'_>) -> u64 {
    let solid_at = |x: i32, y: i32, z: i32| {
        if x < 0
            || y < 0
            || z < 0
            || x >= CHUNK_WIDTH as i32
            || y >= CHUNK_WIDTH as i32
            || z >= CHUNK_HEIGHT as i32
        {
            return false;
        }
        chunk.get(x as usize, y as usize, z as usize).is_solid()
    };

    let mut faces = 0;
    for x in 0..CHUNK_WIDTH as i32 {
        for y in 0..CHUNK_WIDTH as i32 {
            for z in 0..CHUNK_HEIGHT as i32 {
                if !solid_at(x, y, z) {
                    continue;
                }
                for (dx, dy, dz) in [
                    (1, 0, 0),
                    (-1, 0, 0),
                    (0, 1, 0),
                    (0, -1, 0),
                    (0, 0, 1),
                    (0, 0, -1),
                ] {
                    if !solid_at(x + dx, y + dy, z + dz) {
                        faces += 1;
                    }
                }
            }
        }
    }
    faces
}

/// Sum of merged quad areas from the far-corner texture coordinates.
fn total_quad_area(mesh: &RegionMesh) -> u64 {
    mesh.vertices
        .chunks_exact(4)
        .map(|quad| (quad[2].tex_u() * quad[2].tex_v()) as u64)
        .sum()
}

fn mesh_single_chunk(blocks: &[BlockId]) -> RegionMesh {
    let mut mesh = RegionMesh::new(ChunkPos::ZERO);
    let mut workspace = MeshingWorkspace::new();
    GreedyMesher::mesh_chunk(
        Chunk::new(ChunkPos::ZERO, blocks),
        &mut workspace,
        &mut mesh,
    );
    mesh
}

#[test]
fn test_merged_quads_cover_exactly_the_exposed_faces() {
    // Random voxel soup at several densities; merging must preserve total
    // face area exactly, whatever the merge opportunities.
    let mut rng = ChaCha8Rng::seed_from_u64(0xC0FFEE);

    for density in [0.05, 0.3, 0.7, 0.95] {
        let mut blocks = vec![BlockId::Empty; CHUNK_VOLUME];
        let mut view = ChunkMut::new(ChunkPos::ZERO, &mut blocks);
        for x in 0..CHUNK_WIDTH {
            for y in 0..CHUNK_WIDTH {
                for z in 0..CHUNK_HEIGHT {
                    if rng.gen_bool(density) {
                        let choice = rng.gen_range(1..BlockId::ALL.len());
                        view.set(x, y, z, BlockId::ALL[choice]);
                    }
                }
            }
        }

        let expected = brute_force_face_count(Chunk::new(ChunkPos::ZERO, &blocks));
        let mesh = mesh_single_chunk(&blocks);

        assert_eq!(
            total_quad_area(&mesh),
            expected,
            "area mismatch at density {density}"
        );
        assert_eq!(mesh.vertices.len() % 4, 0);
        assert_eq!(mesh.indices.len(), mesh.quad_count() * 6);
    }
}

#[test]
fn test_greedy_never_emits_more_quads_than_faces() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut blocks = vec![BlockId::Empty; CHUNK_VOLUME];
    let mut view = ChunkMut::new(ChunkPos::ZERO, &mut blocks);
    for x in 0..CHUNK_WIDTH {
        for y in 0..CHUNK_WIDTH {
            for z in 0..64 {
                if rng.gen_bool(0.5) {
                    view.set(x, y, z, BlockId::Stone);
                }
            }
        }
    }

    let expected = brute_force_face_count(Chunk::new(ChunkPos::ZERO, &blocks));
    let mesh = mesh_single_chunk(&blocks);
    assert!(mesh.quad_count() as u64 <= expected);
    assert_eq!(total_quad_area(&mesh), expected);
}

#[test]
fn test_parallel_meshing_matches_serial() {
    let _ = env_logger::builder().is_test(true).try_init();
    let region = Region::new(ChunkPos::new(3, -1), 2, PerlinTerrain::new(1234));

    let serial = GreedyMesher::mesh_region(&region);
    let parallel = GreedyMesher::mesh_region_parallel(&region);

    assert_eq!(serial.corner, parallel.corner);
    assert_eq!(serial.vertices, parallel.vertices);
    assert_eq!(serial.indices, parallel.indices);
    assert!(!serial.is_empty());
}

#[test]
fn test_region_mesh_positions_fit_the_render_area() {
    let radius = 2;
    let mut region = Region::new(ChunkPos::new(-5, 9), radius, PerlinTerrain::new(7));
    region.change_origin(ChunkPos::new(-4, 9)).unwrap();
    region.change_origin(ChunkPos::new(-4, 10)).unwrap();

    let mesh = GreedyMesher::mesh_region(&region);
    assert_eq!(mesh.corner, region.corner());

    // All coordinates are corner-relative and bounded by the window extent,
    // so they survive the bit-packed encoding losslessly.
    let horizontal_extent = ((2 * radius + 1) as u32) * CHUNK_WIDTH as u32;
    for vertex in &mesh.vertices {
        assert!(vertex.x() <= horizontal_extent);
        assert!(vertex.y() <= horizontal_extent);
        assert!(vertex.z() <= CHUNK_HEIGHT as u32);
    }

    for index in &mesh.indices {
        assert!((*index as usize) < mesh.vertices.len());
    }
}

#[test]
fn test_every_index_triple_is_a_real_triangle() {
    let region = Region::new(ChunkPos::ZERO, 1, PerlinTerrain::new(99));
    let mesh = GreedyMesher::mesh_region(&region);

    for triangle in mesh.indices.chunks_exact(3) {
        assert!(triangle[0] != triangle[1]);
        assert!(triangle[1] != triangle[2]);
        assert!(triangle[0] != triangle[2]);
    }
}
