use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use strata_blocks::BlockMatcher;

use crate::lattice::NoiseRole;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default)]
    pub noise: Noise,
    #[serde(default)]
    pub climate: Climate,
    #[serde(default)]
    pub report: Report,
    #[serde(default)]
    pub runtime: Runtime,
}

fn default_seed() -> i32 {
    1337
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            noise: Noise::default(),
            climate: Climate::default(),
            report: Report::default(),
            runtime: Runtime::default(),
        }
    }
}

impl WorldGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }
}

/// Generator settings for each lattice role.
#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default = "default_biome_influence")]
    pub biome_influence: Fractal,
    #[serde(default = "default_depth")]
    pub depth: Fractal,
    #[serde(default = "default_limit")]
    pub lower_limit: Fractal,
    #[serde(default = "default_limit")]
    pub upper_limit: Fractal,
    #[serde(default = "default_main")]
    pub main: Fractal,
}

// Amplitudes sit next to the divisors the density math applies, so each
// role lands in the range the shaping functions expect.
fn default_biome_influence() -> Fractal {
    Fractal {
        frequency: 0.004,
        octaves: 4,
        persistence: 0.5,
        lacunarity: 2.0,
        amplitude: 512.0,
    }
}
fn default_depth() -> Fractal {
    Fractal {
        frequency: 0.0025,
        octaves: 5,
        persistence: 0.5,
        lacunarity: 2.0,
        amplitude: 8000.0,
    }
}
fn default_limit() -> Fractal {
    Fractal {
        frequency: 0.006,
        octaves: 6,
        persistence: 0.55,
        lacunarity: 2.0,
        amplitude: 8192.0,
    }
}
fn default_main() -> Fractal {
    Fractal {
        frequency: 0.012,
        octaves: 4,
        persistence: 0.5,
        lacunarity: 2.0,
        amplitude: 40.0,
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self {
            biome_influence: default_biome_influence(),
            depth: default_depth(),
            lower_limit: default_limit(),
            upper_limit: default_limit(),
            main: default_main(),
        }
    }
}

impl Noise {
    pub fn role(&self, role: NoiseRole) -> &Fractal {
        match role {
            NoiseRole::BiomeInfluence => &self.biome_influence,
            NoiseRole::Depth => &self.depth,
            NoiseRole::LowerLimit => &self.lower_limit,
            NoiseRole::UpperLimit => &self.upper_limit,
            NoiseRole::Main => &self.main,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Fractal {
    #[serde(default = "d_freq")]
    pub frequency: f32,
    #[serde(default = "d_oct")]
    pub octaves: i32,
    #[serde(default = "d_pers")]
    pub persistence: f32,
    #[serde(default = "d_lac")]
    pub lacunarity: f32,
    #[serde(default = "d_amp")]
    pub amplitude: f64,
}
fn d_freq() -> f32 {
    0.01
}
fn d_oct() -> i32 {
    4
}
fn d_pers() -> f32 {
    0.5
}
fn d_lac() -> f32 {
    2.0
}
fn d_amp() -> f64 {
    1.0
}

#[derive(Clone, Debug, Deserialize)]
pub struct Climate {
    #[serde(default = "default_temperature_freq")]
    pub temperature_frequency: f32,
    #[serde(default = "default_rainfall_freq")]
    pub rainfall_frequency: f32,
}
fn default_temperature_freq() -> f32 {
    0.002
}
fn default_rainfall_freq() -> f32 {
    0.003
}
impl Default for Climate {
    fn default() -> Self {
        Self {
            temperature_frequency: default_temperature_freq(),
            rainfall_frequency: default_rainfall_freq(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Report {
    /// Blocks that count as the surface when scanning a column top-down.
    #[serde(default)]
    pub surface: BlockMatcher,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Runtime {
    /// Worker threads; 0 uses the available parallelism.
    #[serde(default)]
    pub workers: usize,
}

// Flattened params used in tight loops (snapshot of config)
#[derive(Clone, Debug)]
pub struct WorldGenParams {
    pub seed: i32,
    pub noise: [Fractal; NoiseRole::COUNT],
    pub temperature_frequency: f32,
    pub rainfall_frequency: f32,
    pub surface: BlockMatcher,
    pub workers: usize,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            seed: cfg.seed,
            noise: NoiseRole::ALL.map(|role| cfg.noise.role(role).clone()),
            temperature_frequency: cfg.climate.temperature_frequency,
            rainfall_frequency: cfg.climate.rainfall_frequency,
            surface: cfg.report.surface.clone(),
            workers: cfg.runtime.workers,
        }
    }

    #[inline]
    pub fn fractal(&self, role: NoiseRole) -> &Fractal {
        &self.noise[role.index()]
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg = WorldGenConfig::from_toml_str(&s)?;
    log::info!("worldgen config loaded from {}", path.display());
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_blocks::Block;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = WorldGenConfig::from_toml_str("").unwrap();
        let params = WorldGenParams::from_config(&cfg);
        assert_eq!(params.seed, 1337);
        assert_eq!(params.fractal(NoiseRole::Depth).amplitude, 8000.0);
        assert_eq!(params.workers, 0);
        assert!(!params.surface.matches(&Block::Air));
    }

    #[test]
    fn partial_tables_override_fields() {
        let cfg = WorldGenConfig::from_toml_str(
            r#"
            seed = -9

            [noise.main]
            frequency = 0.05
            amplitude = 20.0

            [climate]
            rainfall_frequency = 0.1

            [report.surface]
            blocks = ["stone"]
            blacklist = false

            [runtime]
            workers = 3
        "#,
        )
        .unwrap();
        let params = WorldGenParams::from_config(&cfg);
        assert_eq!(params.seed, -9);
        let main = params.fractal(NoiseRole::Main);
        assert_eq!(main.frequency, 0.05);
        assert_eq!(main.amplitude, 20.0);
        assert_eq!(main.octaves, 4);
        assert_eq!(params.fractal(NoiseRole::LowerLimit), &default_limit());
        assert_eq!(params.rainfall_frequency, 0.1);
        assert_eq!(params.temperature_frequency, 0.002);
        assert!(params.surface.matches(&Block::Stone));
        assert!(!params.surface.matches(&Block::Ice));
        assert_eq!(params.workers, 3);
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let cfg = WorldGenConfig::from_toml_str(include_str!("../../../strata.toml")).unwrap();
        let params = WorldGenParams::from_config(&cfg);
        let defaults = WorldGenParams::default();
        assert_eq!(params.seed, defaults.seed);
        assert_eq!(params.noise, defaults.noise);
        assert_eq!(params.surface, defaults.surface);
        assert_eq!(params.rainfall_frequency, defaults.rainfall_frequency);
    }

    #[test]
    fn empty_surface_table_keeps_default_matcher() {
        let cfg = WorldGenConfig::from_toml_str("[report.surface]\n").unwrap();
        let params = WorldGenParams::from_config(&cfg);
        assert_eq!(params.surface, BlockMatcher::default());
        assert!(params.surface.matches(&Block::StationaryWater));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(WorldGenConfig::from_toml_str("seed = \"abc\"").is_err());
    }
}
