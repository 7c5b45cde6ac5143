//! Command-line argument parsing for the `strata` binary.

use std::path::PathBuf;

use clap::Parser;
use strata_world::{ChunkCoord, WorldGenConfig};

/// Generate terrain chunks and print a report for each.
///
/// CLI values override settings loaded from `--config`.
#[derive(Parser, Debug)]
#[command(name = "strata", about = "Density-field terrain generator")]
pub struct CliArgs {
    /// World generation config (TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// World seed.
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<i32>,

    /// Chunk to generate, as `CX,CZ`. Repeatable; defaults to `0,0`.
    #[arg(long = "chunk", value_name = "CX,CZ", allow_hyphen_values = true)]
    pub chunks: Vec<ChunkCoord>,

    /// Print the blocks of the world column at `X,Z`.
    #[arg(long, value_name = "X,Z", value_parser = parse_world_column, allow_hyphen_values = true)]
    pub profile: Option<(i32, i32)>,

    /// Print an ASCII map of surface heights for each chunk.
    #[arg(long)]
    pub heightmap: bool,

    /// Worker threads (0 = available parallelism).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Log level or `env_logger` filter string (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

fn parse_world_column(s: &str) -> Result<(i32, i32), String> {
    let bad = || format!("expected world column as `X,Z`, got `{s}`");
    let (x, z) = s.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse().map_err(|_| bad())?;
    let z = z.trim().parse().map_err(|_| bad())?;
    Ok((x, z))
}

impl CliArgs {
    /// Requested chunks in order, without repeats. Includes the chunk holding
    /// the profiled column.
    pub fn requested_chunks(&self) -> Vec<ChunkCoord> {
        let mut out: Vec<ChunkCoord> = Vec::with_capacity(self.chunks.len() + 1);
        for &c in &self.chunks {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        if let Some((x, z)) = self.profile {
            let c = ChunkCoord::containing(x, z);
            if !out.contains(&c) {
                out.push(c);
            }
        }
        if out.is_empty() {
            out.push(ChunkCoord::new(0, 0));
        }
        out
    }
}

/// Apply CLI overrides to a loaded config.
pub fn apply_cli_overrides(cfg: &mut WorldGenConfig, args: &CliArgs) {
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(workers) = args.workers {
        cfg.runtime.workers = workers;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            config: None,
            seed: None,
            chunks: Vec::new(),
            profile: None,
            heightmap: false,
            workers: None,
            log_level: None,
        }
    }

    #[test]
    fn cli_overrides_config() {
        let mut cfg = WorldGenConfig::default();
        let args = CliArgs {
            seed: Some(-42),
            workers: Some(3),
            ..empty_args()
        };
        apply_cli_overrides(&mut cfg, &args);
        assert_eq!(cfg.seed, -42);
        assert_eq!(cfg.runtime.workers, 3);
    }

    #[test]
    fn cli_without_overrides_keeps_config() {
        let mut cfg = WorldGenConfig::from_toml_str("seed = 7").unwrap();
        apply_cli_overrides(&mut cfg, &empty_args());
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.runtime.workers, 0);
    }

    #[test]
    fn parses_flags() {
        let args = CliArgs::try_parse_from([
            "strata",
            "--seed",
            "-5",
            "--chunk",
            "1,2",
            "--chunk",
            "-3,4",
            "--chunk",
            "1,2",
            "--profile",
            "-20,7",
            "--heightmap",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(-5));
        assert!(args.heightmap);
        assert_eq!(args.profile, Some((-20, 7)));
        assert_eq!(
            args.requested_chunks(),
            vec![
                ChunkCoord::new(1, 2),
                ChunkCoord::new(-3, 4),
                ChunkCoord::new(-2, 0),
            ]
        );
    }

    #[test]
    fn defaults_to_origin_chunk() {
        assert_eq!(empty_args().requested_chunks(), vec![ChunkCoord::new(0, 0)]);
    }

    #[test]
    fn rejects_malformed_coords() {
        assert!(CliArgs::try_parse_from(["strata", "--chunk", "12"]).is_err());
        assert!(CliArgs::try_parse_from(["strata", "--profile", "a,b"]).is_err());
    }
}
