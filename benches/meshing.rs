/// Benchmark suite for greedy meshing
/// Covers the degenerate extremes plus realistic terrain, single chunks and
/// whole regions, serial and parallel.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voxel_region::meshing::{GreedyMesher, MeshingWorkspace, RegionMesh};
use voxel_region::voxel::{BlockId, Chunk, ChunkMut, ChunkPos};
use voxel_region::{PerlinTerrain, Region, TerrainFill, CHUNK_VOLUME};

fn mesh_once(blocks: &[BlockId], workspace: &mut MeshingWorkspace) -> RegionMesh {
    let mut mesh = RegionMesh::new(ChunkPos::ZERO);
    GreedyMesher::mesh_chunk(
        Chunk::new(ChunkPos::ZERO, blocks),
        workspace,
        &mut mesh,
    );
    mesh
}

fn bench_mesh_empty_chunk(c: &mut Criterion) {
    c.bench_function("mesh_empty_chunk", |b| {
        let blocks = vec![BlockId::Empty; CHUNK_VOLUME];
        let mut workspace = MeshingWorkspace::new();
        b.iter(|| mesh_once(black_box(&blocks), &mut workspace));
    });
}

fn bench_mesh_solid_chunk(c: &mut Criterion) {
    c.bench_function("mesh_solid_chunk", |b| {
        let blocks = vec![BlockId::Stone; CHUNK_VOLUME];
        let mut workspace = MeshingWorkspace::new();
        b.iter(|| mesh_once(black_box(&blocks), &mut workspace));
    });
}

fn bench_mesh_terrain_chunk(c: &mut Criterion) {
    c.bench_function("mesh_terrain_chunk", |b| {
        let generator = PerlinTerrain::new(1234);
        let mut blocks = vec![BlockId::Empty; CHUNK_VOLUME];
        let mut view = ChunkMut::new(ChunkPos::ZERO, &mut blocks);
        generator.fill(&mut view);

        let mut workspace = MeshingWorkspace::new();
        b.iter(|| mesh_once(black_box(&blocks), &mut workspace));
    });
}

fn bench_mesh_checkerboard_chunk(c: &mut Criterion) {
    c.bench_function("mesh_checkerboard_chunk", |b| {
        // No two faces ever merge; worst case for quad output volume.
        let mut blocks = vec![BlockId::Empty; CHUNK_VOLUME];
        let mut view = ChunkMut::new(ChunkPos::ZERO, &mut blocks);
        for x in 0..16 {
            for y in 0..16 {
                for z in 0..256 {
                    if (x + y + z) % 2 == 0 {
                        view.set(x, y, z, BlockId::Stone);
                    }
                }
            }
        }

        let mut workspace = MeshingWorkspace::new();
        b.iter(|| mesh_once(black_box(&blocks), &mut workspace));
    });
}

fn bench_mesh_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_region");
    group.sample_size(20);

    for radius in [1, 2, 4].iter() {
        let region = Region::new(ChunkPos::ZERO, *radius, PerlinTerrain::new(1234));
        group.bench_with_input(BenchmarkId::new("serial", radius), &region, |b, region| {
            b.iter(|| GreedyMesher::mesh_region(black_box(region)));
        });
        group.bench_with_input(
            BenchmarkId::new("parallel", radius),
            &region,
            |b, region| {
                b.iter(|| GreedyMesher::mesh_region_parallel(black_box(region)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_mesh_empty_chunk,
    bench_mesh_solid_chunk,
    bench_mesh_terrain_chunk,
    bench_mesh_checkerboard_chunk,
    bench_mesh_region
);
criterion_main!(benches);
