//! Per-column temperature and rainfall.
//!
//! Where these values come from is not the terrain's business; the generator
//! only reads them through [`ClimateSource`].

use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::chunk_coord::ChunkCoord;
use crate::worldgen::WorldGenParams;
use crate::{CHUNK_COLUMNS, CHUNK_SIZE_X, CHUNK_SIZE_Z};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnAttributes {
    pub temperature: f64,
    pub rainfall: f64,
}

impl ColumnAttributes {
    pub const fn new(temperature: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            rainfall,
        }
    }
}

/// Attributes for the 16 x 16 columns of one chunk, indexed `lz * 16 + lx`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClimateMap {
    columns: Vec<ColumnAttributes>,
}

impl ClimateMap {
    pub fn filled(attrs: ColumnAttributes) -> Self {
        Self {
            columns: vec![attrs; CHUNK_COLUMNS],
        }
    }

    #[inline]
    pub fn index(lx: usize, lz: usize) -> usize {
        debug_assert!(lx < CHUNK_SIZE_X && lz < CHUNK_SIZE_Z);
        lz * CHUNK_SIZE_X + lx
    }

    #[inline]
    pub fn get(&self, lx: usize, lz: usize) -> ColumnAttributes {
        self.columns[Self::index(lx, lz)]
    }

    #[inline]
    pub fn set(&mut self, lx: usize, lz: usize, attrs: ColumnAttributes) {
        self.columns[Self::index(lx, lz)] = attrs;
    }
}

impl Default for ClimateMap {
    fn default() -> Self {
        Self::filled(ColumnAttributes::default())
    }
}

/// Read-only climate lookup. Implementations must give the same answer for
/// the same chunk every time they are asked.
pub trait ClimateSource: Send + Sync {
    fn sample_chunk(&self, coord: ChunkCoord, out: &mut ClimateMap);
}

/// Same attributes everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClimate(pub ColumnAttributes);

impl ClimateSource for FixedClimate {
    fn sample_chunk(&self, _coord: ChunkCoord, out: &mut ClimateMap) {
        *out = ClimateMap::filled(self.0);
    }
}

/// Two low-frequency 2-D noises remapped into `[0, 1]`.
pub struct NoiseClimate {
    temperature: FastNoiseLite,
    rainfall: FastNoiseLite,
}

impl NoiseClimate {
    pub fn new(seed: i32, temperature_frequency: f32, rainfall_frequency: f32) -> Self {
        let mut temperature = FastNoiseLite::with_seed(seed ^ 0x1203_5F31);
        temperature.set_noise_type(Some(NoiseType::OpenSimplex2));
        temperature.set_frequency(Some(temperature_frequency));
        let mut rainfall = FastNoiseLite::with_seed(((seed as u32) ^ 0x92E3_A1B2u32) as i32);
        rainfall.set_noise_type(Some(NoiseType::OpenSimplex2));
        rainfall.set_frequency(Some(rainfall_frequency));
        Self {
            temperature,
            rainfall,
        }
    }

    pub fn from_params(params: &WorldGenParams) -> Self {
        Self::new(
            params.seed,
            params.temperature_frequency,
            params.rainfall_frequency,
        )
    }

    pub fn attributes_at(&self, wx: i32, wz: i32) -> ColumnAttributes {
        let (x, z) = (wx as f32, wz as f32);
        let t = ((self.temperature.get_noise_2d(x, z) + 1.0) * 0.5).clamp(0.0, 1.0);
        let r = ((self.rainfall.get_noise_2d(x, z) + 1.0) * 0.5).clamp(0.0, 1.0);
        ColumnAttributes::new(f64::from(t), f64::from(r))
    }
}

impl ClimateSource for NoiseClimate {
    fn sample_chunk(&self, coord: ChunkCoord, out: &mut ClimateMap) {
        let (ox, oz) = coord.origin();
        for lz in 0..CHUNK_SIZE_Z {
            for lx in 0..CHUNK_SIZE_X {
                let attrs = self.attributes_at(ox + lx as i32, oz + lz as i32);
                out.set(lx, lz, attrs);
            }
        }
    }
}
