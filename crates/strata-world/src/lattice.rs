//! Coarse per-chunk noise lattices and the block-to-piece coordinate mapping.
//!
//! Each lattice holds 5 x 17 x 5 samples. A piece (one lattice cell) covers a
//! 4 x 8 x 4 block region and shares its boundary samples with its
//! neighbours, so a chunk of 4 x 16 x 4 pieces needs one extra sample on every
//! axis for the far-edge corners.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::chunk_coord::ChunkCoord;
use crate::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z};

pub const PIECE_WIDTH: usize = 4;
pub const PIECE_HEIGHT: usize = 8;
pub const PIECES_XZ: usize = CHUNK_SIZE_X / PIECE_WIDTH;
pub const PIECES_Y: usize = CHUNK_SIZE_Y / PIECE_HEIGHT;
pub const LATTICE_WIDTH: usize = PIECES_XZ + 1;
pub const LATTICE_HEIGHT: usize = PIECES_Y + 1;
pub const LATTICE_LEN: usize = LATTICE_WIDTH * LATTICE_WIDTH * LATTICE_HEIGHT;

const _: () = assert!(CHUNK_SIZE_X == CHUNK_SIZE_Z);
const _: () = assert!(CHUNK_SIZE_X % PIECE_WIDTH == 0 && CHUNK_SIZE_Y % PIECE_HEIGHT == 0);

/// What a lattice is used for. Every role is sampled from its own generator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoiseRole {
    BiomeInfluence,
    Depth,
    LowerLimit,
    UpperLimit,
    Main,
}

impl NoiseRole {
    pub const COUNT: usize = 5;
    pub const ALL: [NoiseRole; NoiseRole::COUNT] = [
        NoiseRole::BiomeInfluence,
        NoiseRole::Depth,
        NoiseRole::LowerLimit,
        NoiseRole::UpperLimit,
        NoiseRole::Main,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            NoiseRole::BiomeInfluence => "biome_influence",
            NoiseRole::Depth => "depth",
            NoiseRole::LowerLimit => "lower_limit",
            NoiseRole::UpperLimit => "upper_limit",
            NoiseRole::Main => "main",
        }
    }
}

impl fmt::Display for NoiseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LatticeError {
    #[error("non-finite {role} sample {value} at lattice ({x}, {y}, {z})")]
    NonFinite {
        role: NoiseRole,
        x: usize,
        y: usize,
        z: usize,
        value: f64,
    },
    #[error("chunk {0} lies outside the world; sample positions would overflow")]
    OutOfRange(ChunkCoord),
}

/// One role's samples for one chunk, addressed as `[x][z][y]`.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseLattice {
    samples: [f64; LATTICE_LEN],
}

impl NoiseLattice {
    pub const fn filled(value: f64) -> Self {
        Self {
            samples: [value; LATTICE_LEN],
        }
    }

    pub fn from_fn(mut f: impl FnMut(usize, usize, usize) -> f64) -> Self {
        let mut lattice = Self::filled(0.0);
        for x in 0..LATTICE_WIDTH {
            for z in 0..LATTICE_WIDTH {
                for y in 0..LATTICE_HEIGHT {
                    lattice.set(x, z, y, f(x, z, y));
                }
            }
        }
        lattice
    }

    #[inline]
    pub const fn index(x: usize, z: usize, y: usize) -> usize {
        (x * LATTICE_WIDTH + z) * LATTICE_HEIGHT + y
    }

    /// Panics when any index is outside the 5 x 5 x 17 shape. A flat index
    /// alone would silently alias into the neighbouring row instead.
    #[inline]
    pub fn get(&self, x: usize, z: usize, y: usize) -> f64 {
        assert!(
            x < LATTICE_WIDTH && z < LATTICE_WIDTH && y < LATTICE_HEIGHT,
            "lattice index ({x}, {z}, {y}) outside {LATTICE_WIDTH}x{LATTICE_WIDTH}x{LATTICE_HEIGHT}"
        );
        self.samples[Self::index(x, z, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, z: usize, y: usize, value: f64) {
        assert!(
            x < LATTICE_WIDTH && z < LATTICE_WIDTH && y < LATTICE_HEIGHT,
            "lattice index ({x}, {z}, {y}) outside {LATTICE_WIDTH}x{LATTICE_WIDTH}x{LATTICE_HEIGHT}"
        );
        self.samples[Self::index(x, z, y)] = value;
    }

    /// World block position of sample (x, z, y) for `coord`. Edge samples land
    /// on the neighbouring chunk's origin, which is what keeps chunk borders
    /// seamless.
    #[inline]
    pub fn sample_world_pos(coord: ChunkCoord, x: usize, z: usize, y: usize) -> (i32, i32, i32) {
        let (ox, oz) = coord.origin();
        (
            ox + (x * PIECE_WIDTH) as i32,
            (y * PIECE_HEIGHT) as i32,
            oz + (z * PIECE_WIDTH) as i32,
        )
    }

    fn first_non_finite(&self) -> Option<(usize, usize, usize, f64)> {
        let pos = self.samples.iter().position(|v| !v.is_finite())?;
        let y = pos % LATTICE_HEIGHT;
        let z = (pos / LATTICE_HEIGHT) % LATTICE_WIDTH;
        let x = pos / (LATTICE_HEIGHT * LATTICE_WIDTH);
        Some((x, y, z, self.samples[pos]))
    }
}

impl Default for NoiseLattice {
    fn default() -> Self {
        Self::filled(0.0)
    }
}

/// The five lattices sampled for one chunk.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LatticeSet {
    lattices: [NoiseLattice; NoiseRole::COUNT],
}

impl LatticeSet {
    pub fn new(lattices: [NoiseLattice; NoiseRole::COUNT]) -> Self {
        Self { lattices }
    }

    pub fn uniform(values: [f64; NoiseRole::COUNT]) -> Self {
        Self {
            lattices: values.map(NoiseLattice::filled),
        }
    }

    #[inline]
    pub fn lattices_mut(&mut self) -> &mut [NoiseLattice] {
        &mut self.lattices
    }

    /// Rejects NaN and infinite samples before they reach the density math.
    pub fn validate(&self) -> Result<(), LatticeError> {
        for role in NoiseRole::ALL {
            if let Some((x, y, z, value)) = self[role].first_non_finite() {
                return Err(LatticeError::NonFinite {
                    role,
                    x,
                    y,
                    z,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Index<NoiseRole> for LatticeSet {
    type Output = NoiseLattice;

    #[inline]
    fn index(&self, role: NoiseRole) -> &NoiseLattice {
        &self.lattices[role.index()]
    }
}

impl IndexMut<NoiseRole> for LatticeSet {
    #[inline]
    fn index_mut(&mut self, role: NoiseRole) -> &mut NoiseLattice {
        &mut self.lattices[role.index()]
    }
}

/// Lattice cell containing a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub x: usize,
    pub z: usize,
    pub y: usize,
}

/// Block offset inside its piece, `[0, 4) x [0, 8) x [0, 4)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Inner {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

/// Splits a local block position so that
/// `local = piece * piece_size + inner` holds on every axis.
#[inline]
pub fn split_local(x: usize, y: usize, z: usize) -> (Piece, Inner) {
    debug_assert!(
        x < CHUNK_SIZE_X && y < CHUNK_SIZE_Y && z < CHUNK_SIZE_Z,
        "local block ({x}, {y}, {z}) outside chunk"
    );
    (
        Piece {
            x: x / PIECE_WIDTH,
            z: z / PIECE_WIDTH,
            y: y / PIECE_HEIGHT,
        },
        Inner {
            x: x % PIECE_WIDTH,
            y: y % PIECE_HEIGHT,
            z: z % PIECE_WIDTH,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_constants() {
        assert_eq!((LATTICE_WIDTH, LATTICE_HEIGHT), (5, 17));
        assert_eq!((PIECES_XZ, PIECES_Y), (4, 16));
        assert_eq!(LATTICE_LEN, 425);
    }

    #[test]
    fn split_recombines() {
        for x in 0..CHUNK_SIZE_X {
            for y in 0..CHUNK_SIZE_Y {
                let (p, i) = split_local(x, y, 15 - x);
                assert_eq!(p.x * PIECE_WIDTH + i.x, x);
                assert_eq!(p.y * PIECE_HEIGHT + i.y, y);
                assert_eq!(p.z * PIECE_WIDTH + i.z, 15 - x);
                assert!(p.x < PIECES_XZ && p.z < PIECES_XZ && p.y < PIECES_Y);
            }
        }
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn vertical_overflow_does_not_alias() {
        let lattice = NoiseLattice::filled(1.0);
        let _ = lattice.get(0, 0, LATTICE_HEIGHT);
    }

    #[test]
    fn validate_reports_first_bad_sample() {
        let mut set = LatticeSet::uniform([0.0; NoiseRole::COUNT]);
        set[NoiseRole::Main].set(2, 3, 11, f64::NAN);
        set[NoiseRole::Depth].set(4, 0, 16, f64::INFINITY);
        match set.validate() {
            Err(LatticeError::NonFinite { role, x, y, z, value }) => {
                assert_eq!(role, NoiseRole::Depth);
                assert_eq!((x, y, z), (4, 16, 0));
                assert!(value.is_infinite());
            }
            other => panic!("unexpected {other:?}"),
        }
        set[NoiseRole::Depth].set(4, 0, 16, 0.0);
        assert!(matches!(
            set.validate(),
            Err(LatticeError::NonFinite { role: NoiseRole::Main, x: 2, y: 11, z: 3, .. })
        ));
    }

    #[test]
    fn edge_samples_meet_neighbour_origin() {
        let c = ChunkCoord::new(2, -1);
        let far = NoiseLattice::sample_world_pos(c, LATTICE_WIDTH - 1, LATTICE_WIDTH - 1, 0);
        let (nx, nz) = c.offset(1, 1).origin();
        assert_eq!((far.0, far.2), (nx, nz));
        let top = NoiseLattice::sample_world_pos(c, 0, 0, LATTICE_HEIGHT - 1);
        assert_eq!(top.1, CHUNK_SIZE_Y as i32);
    }
}
