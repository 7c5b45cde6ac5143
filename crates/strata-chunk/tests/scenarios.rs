use std::sync::Arc;

use strata_blocks::{Block, BlockMatcher};
use strata_chunk::{ChunkOccupancy, generate_chunk};
use strata_world::shape::SEA_LEVEL;
use strata_world::{
    CHUNK_SIZE_X, CHUNK_SIZE_Z, ChunkCoord, ColumnAttributes, ConstantSampler, FixedClimate,
    World, WorldGenParams,
};

fn seeded(seed: i32) -> World {
    World::new(WorldGenParams {
        seed,
        ..WorldGenParams::default()
    })
}

#[test]
fn same_seed_same_chunk_across_worlds() {
    let a = generate_chunk(&seeded(99), ChunkCoord::new(-4, 11)).unwrap();
    let b = generate_chunk(&seeded(99), ChunkCoord::new(-4, 11)).unwrap();
    assert_eq!(a.buf, b.buf);
}

#[test]
fn different_seeds_differ() {
    let a = generate_chunk(&seeded(1), ChunkCoord::new(0, 0)).unwrap();
    let b = generate_chunk(&seeded(2), ChunkCoord::new(0, 0)).unwrap();
    assert_ne!(a.buf, b.buf);
}

#[test]
fn noise_terrain_has_bedrock_stone_and_open_sky() {
    let world = seeded(1337);
    for cx in -2..2 {
        let r = generate_chunk(&world, ChunkCoord::new(cx, 3)).unwrap();
        assert_eq!(r.occupancy, ChunkOccupancy::Populated);
        for z in 0..CHUNK_SIZE_Z {
            for x in 0..CHUNK_SIZE_X {
                assert_eq!(r.buf.get_local(x, 0, z), Block::Stone);
                assert_eq!(r.buf.get_local(x, 127, z), Block::Air);
            }
        }
    }
}

#[test]
fn water_only_below_or_at_sea_level() {
    let r = generate_chunk(&seeded(5), ChunkCoord::new(7, -7)).unwrap();
    for (i, b) in r.buf.blocks.iter().enumerate() {
        let y = (i / (CHUNK_SIZE_X * CHUNK_SIZE_Z)) as i32;
        match b {
            Block::StationaryWater => assert!(y <= SEA_LEVEL),
            Block::Ice => assert_eq!(y, SEA_LEVEL),
            _ => {}
        }
    }
}

#[test]
fn flat_scenario_surface_is_uniform() {
    let world = World::with_collaborators(
        Arc::new(WorldGenParams::default()),
        Arc::new(ConstantSampler::new([0.0; 5])),
        Arc::new(FixedClimate(ColumnAttributes::new(0.9, 0.9))),
    );
    for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(-100, 250)] {
        let r = generate_chunk(&world, coord).unwrap();
        let solid = BlockMatcher::solid();
        for z in 0..CHUNK_SIZE_Z {
            for x in 0..CHUNK_SIZE_X {
                assert_eq!(r.buf.surface_height(x, z, &solid), Some(55));
            }
        }
    }
}
