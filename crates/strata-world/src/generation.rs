use rayon::prelude::*;
use strata_blocks::Block;

use crate::chunk_coord::ChunkCoord;
use crate::column::{Column, ColumnPlan, build_column_plan};
use crate::gen_ctx::{GenCtx, World};
use crate::interp::sample_block;
use crate::lattice::{LatticeError, LatticeSet, NoiseRole};
use crate::shape::{compute_density, select_block};
use crate::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, CHUNK_VOLUME};

const LAYER: usize = CHUNK_SIZE_X * CHUNK_SIZE_Z;

/// Material at local block (x, y, z) of a column.
#[inline]
pub fn evaluate_block(
    lattices: &LatticeSet,
    column: &Column,
    x: usize,
    y: usize,
    z: usize,
) -> Block {
    let lower = sample_block(&lattices[NoiseRole::LowerLimit], x, y, z);
    let upper = sample_block(&lattices[NoiseRole::UpperLimit], x, y, z);
    let main = sample_block(&lattices[NoiseRole::Main], x, y, z);
    let y = y as i32;
    let density = compute_density(y, column.chaos, column.height_center, lower, upper, main);
    select_block(density, column.temperature, y)
}

/// Writes every block of a chunk into `out`, indexed `(y * 16 + z) * 16 + x`.
/// Horizontal layers are filled in parallel.
pub fn fill_chunk_blocks(lattices: &LatticeSet, plan: &ColumnPlan, out: &mut [Block]) {
    assert_eq!(out.len(), CHUNK_VOLUME, "block buffer has wrong length");
    out.par_chunks_mut(LAYER)
        .enumerate()
        .for_each(|(y, layer)| {
            for z in 0..CHUNK_SIZE_Z {
                for x in 0..CHUNK_SIZE_X {
                    let column = plan.column(x, z);
                    layer[z * CHUNK_SIZE_X + x] = evaluate_block(lattices, column, x, y, z);
                }
            }
        });
}

impl World {
    /// Runs the lattice and column stages for `coord` into `ctx`.
    pub fn prepare_chunk(
        &self,
        ctx: &mut GenCtx,
        coord: ChunkCoord,
    ) -> Result<ColumnPlan, LatticeError> {
        if !coord.in_range() {
            return Err(LatticeError::OutOfRange(coord));
        }
        ctx.sampler.sample_chunk(coord, &mut ctx.lattices);
        ctx.lattices.validate()?;
        ctx.climate.sample_chunk(coord, &mut ctx.climate_map);
        Ok(build_column_plan(&ctx.lattices, &ctx.climate_map))
    }

    /// Single-block query in world coordinates.
    pub fn block_at(&self, wx: i32, y: i32, wz: i32) -> Result<Block, LatticeError> {
        if !(0..CHUNK_SIZE_Y as i32).contains(&y) {
            return Ok(Block::Air);
        }
        // PERF: samples the whole chunk lattice; use a chunk generator for bulk reads.
        let mut ctx = self.make_gen_ctx();
        let coord = ChunkCoord::containing(wx, wz);
        let plan = self.prepare_chunk(&mut ctx, coord)?;
        let (ox, oz) = coord.origin();
        let (lx, lz) = ((wx - ox) as usize, (wz - oz) as usize);
        Ok(evaluate_block(
            &ctx.lattices,
            plan.column(lx, lz),
            lx,
            y as usize,
            lz,
        ))
    }
}
