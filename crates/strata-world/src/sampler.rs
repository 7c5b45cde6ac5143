//! Lattice samplers: the noise generators the terrain consumes as a black box.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use rayon::prelude::*;

use crate::chunk_coord::ChunkCoord;
use crate::lattice::{LATTICE_HEIGHT, LATTICE_WIDTH, LatticeSet, NoiseLattice, NoiseRole};
use crate::worldgen::{Fractal, WorldGenParams};

/// Fills the coarse lattices for a chunk.
///
/// Implementations are shared between worker threads and must be
/// deterministic: the same role and chunk always produce the same samples.
pub trait LatticeSampler: Send + Sync {
    fn sample_role(&self, role: NoiseRole, coord: ChunkCoord, out: &mut NoiseLattice);

    fn sample_chunk(&self, coord: ChunkCoord, out: &mut LatticeSet) {
        for role in NoiseRole::ALL {
            self.sample_role(role, coord, &mut out[role]);
        }
    }
}

/// Fills every lattice of a role with one value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantSampler {
    pub values: [f64; NoiseRole::COUNT],
}

impl ConstantSampler {
    pub const fn new(values: [f64; NoiseRole::COUNT]) -> Self {
        Self { values }
    }
}

impl LatticeSampler for ConstantSampler {
    fn sample_role(&self, role: NoiseRole, _coord: ChunkCoord, out: &mut NoiseLattice) {
        *out = NoiseLattice::filled(self.values[role.index()]);
    }
}

struct RoleNoise {
    noise: FastNoiseLite,
    fractal: Fractal,
}

/// One seeded `FastNoiseLite` per role, summed over octaves.
pub struct FractalNoiseSampler {
    roles: Vec<RoleNoise>,
}

const ROLE_SALTS: [i32; NoiseRole::COUNT] = [0x5A17, 0x3C0D_E1, 0x10_3E5, 0x0FF_5E7, 0x4A1_B00];

impl FractalNoiseSampler {
    pub fn new(seed: i32, fractals: &[Fractal; NoiseRole::COUNT]) -> Self {
        let roles = NoiseRole::ALL
            .iter()
            .map(|role| {
                let mut noise = FastNoiseLite::with_seed(seed ^ ROLE_SALTS[role.index()]);
                noise.set_noise_type(Some(NoiseType::OpenSimplex2));
                // Frequency is applied per octave in `fractal3`.
                noise.set_frequency(Some(1.0));
                RoleNoise {
                    noise,
                    fractal: fractals[role.index()].clone(),
                }
            })
            .collect();
        Self { roles }
    }

    pub fn from_params(params: &WorldGenParams) -> Self {
        Self::new(params.seed, &params.noise)
    }
}

impl LatticeSampler for FractalNoiseSampler {
    fn sample_role(&self, role: NoiseRole, coord: ChunkCoord, out: &mut NoiseLattice) {
        let RoleNoise { noise, fractal } = &self.roles[role.index()];
        for x in 0..LATTICE_WIDTH {
            for z in 0..LATTICE_WIDTH {
                for y in 0..LATTICE_HEIGHT {
                    let (wx, wy, wz) = NoiseLattice::sample_world_pos(coord, x, z, y);
                    let n = fractal3(noise, wx as f32, wy as f32, wz as f32, fractal);
                    out.set(x, z, y, f64::from(n) * fractal.amplitude);
                }
            }
        }
    }

    fn sample_chunk(&self, coord: ChunkCoord, out: &mut LatticeSet) {
        out.lattices_mut()
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, lattice)| self.sample_role(NoiseRole::ALL[i], coord, lattice));
    }
}

/// Normalised fractal sum in roughly `[-1, 1]`.
fn fractal3(noise: &FastNoiseLite, x: f32, y: f32, z: f32, fractal: &Fractal) -> f32 {
    let mut amp = 1.0_f32;
    let mut freq = fractal.frequency;
    let mut sum = 0.0_f32;
    let mut max_amp = 0.0_f32;
    for _ in 0..fractal.octaves.max(1) {
        sum += noise.get_noise_3d(x * freq, y * freq, z * freq) * amp;
        max_amp += amp;
        amp *= fractal.persistence;
        freq *= fractal.lacunarity;
    }
    if max_amp > 0.0 { sum / max_amp } else { sum }
}
