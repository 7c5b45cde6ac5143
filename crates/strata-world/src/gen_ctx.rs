use std::sync::Arc;
use std::time::Duration;

use crate::climate::{ClimateMap, ClimateSource, NoiseClimate};
use crate::lattice::LatticeSet;
use crate::sampler::{FractalNoiseSampler, LatticeSampler};
use crate::worldgen::WorldGenParams;

/// Shared, read-only generation inputs. Cheap to clone.
#[derive(Clone)]
pub struct World {
    pub params: Arc<WorldGenParams>,
    pub sampler: Arc<dyn LatticeSampler>,
    pub climate: Arc<dyn ClimateSource>,
}

impl World {
    /// World backed by the fractal lattice sampler and noise climate.
    pub fn new(params: WorldGenParams) -> Self {
        let sampler = Arc::new(FractalNoiseSampler::from_params(&params));
        let climate = Arc::new(NoiseClimate::from_params(&params));
        Self::with_collaborators(Arc::new(params), sampler, climate)
    }

    pub fn with_collaborators(
        params: Arc<WorldGenParams>,
        sampler: Arc<dyn LatticeSampler>,
        climate: Arc<dyn ClimateSource>,
    ) -> Self {
        Self {
            params,
            sampler,
            climate,
        }
    }

    pub fn make_gen_ctx(&self) -> GenCtx {
        GenCtx {
            sampler: Arc::clone(&self.sampler),
            climate: Arc::clone(&self.climate),
            lattices: Box::default(),
            climate_map: ClimateMap::default(),
            metrics: GenMetrics::default(),
        }
    }
}

/// Per-worker scratch space. Reused across chunks so the lattice buffers are
/// allocated once per worker.
pub struct GenCtx {
    pub sampler: Arc<dyn LatticeSampler>,
    pub climate: Arc<dyn ClimateSource>,
    pub lattices: Box<LatticeSet>,
    pub climate_map: ClimateMap,
    pub metrics: GenMetrics,
}

/// Stage timings of the last chunk generated with a context, in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenMetrics {
    pub lattice_us: u32,
    pub columns_us: u32,
    pub blocks_us: u32,
}

impl GenMetrics {
    #[inline]
    pub fn total_us(&self) -> u32 {
        self.lattice_us
            .saturating_add(self.columns_us)
            .saturating_add(self.blocks_us)
    }

    #[inline]
    pub fn micros(d: Duration) -> u32 {
        d.as_micros().min(u128::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_share_the_world_collaborators() {
        let world = World::new(WorldGenParams::default());
        let ctx = world.make_gen_ctx();
        assert!(Arc::ptr_eq(&ctx.sampler, &world.sampler));
        assert!(Arc::ptr_eq(&ctx.climate, &world.climate));
        assert_eq!(world.params.seed, 1337);
        assert_eq!(ctx.metrics, GenMetrics::default());
    }

    #[test]
    fn metrics_total_saturates() {
        let m = GenMetrics {
            lattice_us: u32::MAX,
            columns_us: 5,
            blocks_us: 1,
        };
        assert_eq!(m.total_us(), u32::MAX);
        assert_eq!(GenMetrics::micros(Duration::from_millis(3)), 3000);
    }
}
