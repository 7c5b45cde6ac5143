//! Chunk sizing, noise lattices, and the terrain density math.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod climate;
pub mod column;
pub mod gen_ctx;
pub mod generation;
pub mod interp;
pub mod lattice;
pub mod sampler;
pub mod shape;
pub mod worldgen;

pub use chunk_coord::{ChunkCoord, MAX_CHUNK_COORD};
pub use climate::{ClimateMap, ClimateSource, ColumnAttributes, FixedClimate, NoiseClimate};
pub use column::{Column, ColumnPlan, build_column_plan};
pub use gen_ctx::{GenCtx, GenMetrics, World};
pub use lattice::{Inner, LatticeError, LatticeSet, NoiseLattice, NoiseRole, Piece, split_local};
pub use sampler::{ConstantSampler, FractalNoiseSampler, LatticeSampler};
pub use worldgen::{WorldGenConfig, WorldGenParams};

pub const CHUNK_SIZE_X: usize = 16;
pub const CHUNK_SIZE_Y: usize = 128;
pub const CHUNK_SIZE_Z: usize = 16;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;
pub const CHUNK_COLUMNS: usize = CHUNK_SIZE_X * CHUNK_SIZE_Z;
