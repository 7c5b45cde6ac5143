//! Per-column scalars derived once before the block pass.

use crate::climate::ClimateMap;
use crate::interp::trilinear;
use crate::lattice::{Inner, LatticeSet, NoiseRole, PIECE_WIDTH, Piece};
use crate::shape::{compute_chaos, compute_height_center};
use crate::{CHUNK_COLUMNS, CHUNK_SIZE_X, CHUNK_SIZE_Z};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Column {
    pub temperature: f64,
    pub rainfall: f64,
    pub chaos: f64,
    /// Lattice units.
    pub height_center: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnPlan {
    pub columns: Vec<Column>,
}

impl ColumnPlan {
    #[inline]
    pub fn index(lx: usize, lz: usize) -> usize {
        lz * CHUNK_SIZE_X + lx
    }

    #[inline]
    pub fn column(&self, lx: usize, lz: usize) -> &Column {
        &self.columns[Self::index(lx, lz)]
    }
}

/// Piece and offset of a column on the bottom lattice layer.
#[inline]
fn column_position(lx: usize, lz: usize) -> (Piece, Inner) {
    (
        Piece {
            x: lx / PIECE_WIDTH,
            z: lz / PIECE_WIDTH,
            y: 0,
        },
        Inner {
            x: lx % PIECE_WIDTH,
            y: 0,
            z: lz % PIECE_WIDTH,
        },
    )
}

pub fn build_column_plan(lattices: &LatticeSet, climate: &ClimateMap) -> ColumnPlan {
    let biome = &lattices[NoiseRole::BiomeInfluence];
    let depth = &lattices[NoiseRole::Depth];
    let mut columns = Vec::with_capacity(CHUNK_COLUMNS);
    for lz in 0..CHUNK_SIZE_Z {
        for lx in 0..CHUNK_SIZE_X {
            let (piece, inner) = column_position(lx, lz);
            let attrs = climate.get(lx, lz);
            let chaos = compute_chaos(
                trilinear(biome, piece, inner),
                attrs.rainfall,
                attrs.temperature,
            );
            let height_center = compute_height_center(trilinear(depth, piece, inner));
            columns.push(Column {
                temperature: attrs.temperature,
                rainfall: attrs.rainfall,
                chaos,
                height_center,
            });
        }
    }
    ColumnPlan { columns }
}
