//! Chunk buffer and terrain generation entry points.
#![forbid(unsafe_code)]

use std::time::Instant;

use strata_blocks::{Block, BlockMatcher};
use strata_world::generation::fill_chunk_blocks;
use strata_world::{
    CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, CHUNK_VOLUME, ChunkCoord, ClimateMap, GenCtx,
    GenMetrics, LatticeError, LatticeSet, World, build_column_plan,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub blocks: Vec<Block>,
}

impl ChunkBuf {
    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        (y * CHUNK_SIZE_Z + z) * CHUNK_SIZE_X + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let (base_x, base_z) = self.coord.origin();
        if wy < 0 || wy >= CHUNK_SIZE_Y as i32 {
            return false;
        }
        wx >= base_x
            && wx < base_x + CHUNK_SIZE_X as i32
            && wz >= base_z
            && wz < base_z + CHUNK_SIZE_Z as i32
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        if !self.contains_world(wx, wy, wz) {
            return None;
        }
        let (base_x, base_z) = self.coord.origin();
        let lx = (wx - base_x) as usize;
        let lz = (wz - base_z) as usize;
        Some(self.get_local(lx, wy as usize, lz))
    }

    /// Wraps `blocks`, padding with air or truncating to the chunk volume.
    pub fn from_blocks_local(coord: ChunkCoord, blocks: Vec<Block>) -> Self {
        let mut b = blocks;
        if b.len() != CHUNK_VOLUME {
            b.resize(CHUNK_VOLUME, Block::AIR);
        }
        ChunkBuf { coord, blocks: b }
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| *b != Block::AIR)
    }

    /// Block totals indexed by [`Block::id`].
    pub fn counts(&self) -> [usize; Block::COUNT] {
        let mut counts = [0; Block::COUNT];
        for b in &self.blocks {
            counts[b.id() as usize] += 1;
        }
        counts
    }

    /// Highest local y in column (x, z) whose block matches, if any.
    pub fn surface_height(&self, x: usize, z: usize, matcher: &BlockMatcher) -> Option<usize> {
        (0..CHUNK_SIZE_Y)
            .rev()
            .find(|&y| matcher.matches(&self.get_local(x, y, z)))
    }

    /// Blocks of column (x, z) from bottom to top.
    pub fn column(&self, x: usize, z: usize) -> impl Iterator<Item = Block> + '_ {
        (0..CHUNK_SIZE_Y).map(move |y| self.get_local(x, y, z))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkOccupancy {
    Empty,
    Populated,
}

impl ChunkOccupancy {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, ChunkOccupancy::Empty)
    }

    #[inline]
    pub fn has_blocks(self) -> bool {
        matches!(self, ChunkOccupancy::Populated)
    }

    fn of(buf: &ChunkBuf) -> Self {
        if buf.has_non_air() {
            ChunkOccupancy::Populated
        } else {
            ChunkOccupancy::Empty
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChunkGenerateResult {
    pub buf: ChunkBuf,
    pub occupancy: ChunkOccupancy,
    pub metrics: GenMetrics,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("chunk {coord}: {source}")]
    Lattice {
        coord: ChunkCoord,
        #[source]
        source: LatticeError,
    },
}

/// Generates one chunk with a throwaway context.
pub fn generate_chunk(
    world: &World,
    coord: ChunkCoord,
) -> Result<ChunkGenerateResult, GenerateError> {
    let mut ctx = world.make_gen_ctx();
    generate_chunk_with_ctx(&mut ctx, coord)
}

/// Generates one chunk reusing `ctx`'s buffers. The context's metrics are
/// overwritten with this chunk's stage timings.
pub fn generate_chunk_with_ctx(
    ctx: &mut GenCtx,
    coord: ChunkCoord,
) -> Result<ChunkGenerateResult, GenerateError> {
    if !coord.in_range() {
        log::warn!("rejecting chunk {coord}: outside the generated world");
        return Err(GenerateError::Lattice {
            coord,
            source: LatticeError::OutOfRange(coord),
        });
    }
    let lattice_start = Instant::now();
    ctx.sampler.sample_chunk(coord, &mut ctx.lattices);
    if let Err(source) = ctx.lattices.validate() {
        log::warn!("rejecting chunk {coord}: {source}");
        return Err(GenerateError::Lattice { coord, source });
    }
    ctx.climate.sample_chunk(coord, &mut ctx.climate_map);
    let lattice_us = GenMetrics::micros(lattice_start.elapsed());

    let columns_start = Instant::now();
    let plan = build_column_plan(&ctx.lattices, &ctx.climate_map);
    let columns_us = GenMetrics::micros(columns_start.elapsed());

    let blocks_start = Instant::now();
    let mut blocks = vec![Block::AIR; CHUNK_VOLUME];
    fill_chunk_blocks(&ctx.lattices, &plan, &mut blocks);
    let blocks_us = GenMetrics::micros(blocks_start.elapsed());

    ctx.metrics = GenMetrics {
        lattice_us,
        columns_us,
        blocks_us,
    };
    log::debug!(
        "chunk {coord} generated: lattice {lattice_us}us, columns {columns_us}us, blocks {blocks_us}us"
    );

    let buf = ChunkBuf { coord, blocks };
    Ok(ChunkGenerateResult {
        occupancy: ChunkOccupancy::of(&buf),
        buf,
        metrics: ctx.metrics,
    })
}

/// Runs the column and block stages on inputs the caller already has.
/// The lattices are trusted; call [`LatticeSet::validate`] first if unsure.
pub fn generate_from_inputs(
    coord: ChunkCoord,
    lattices: &LatticeSet,
    climate: &ClimateMap,
) -> ChunkBuf {
    let plan = build_column_plan(lattices, climate);
    let mut blocks = vec![Block::AIR; CHUNK_VOLUME];
    fill_chunk_blocks(lattices, &plan, &mut blocks);
    ChunkBuf { coord, blocks }
}
