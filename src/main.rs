mod cli;
mod report;

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use hashbrown::HashMap;
use strata_runtime::{JobOut, Runtime};
use strata_world::worldgen::load_config_from_path;
use strata_world::{ChunkCoord, World, WorldGenConfig, WorldGenParams};

use crate::cli::{CliArgs, apply_cli_overrides};

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(filters) = level {
        builder.parse_filters(filters);
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();
    init_logging(args.log_level.as_deref());

    let mut cfg = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => WorldGenConfig::default(),
    };
    apply_cli_overrides(&mut cfg, &args);
    let params = WorldGenParams::from_config(&cfg);
    let surface = params.surface.clone();
    let workers = params.workers;
    log::info!("seed {}", params.seed);

    let world = Arc::new(World::new(params));
    let rt = Runtime::new(world, workers);
    let requested = args.requested_chunks();
    for &coord in &requested {
        rt.submit(coord);
    }
    let mut results: HashMap<ChunkCoord, JobOut> = HashMap::with_capacity(requested.len());
    while let Some(out) = rt.recv_blocking() {
        results.insert(out.coord, out);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;
    for coord in &requested {
        let Some(job) = results.get(coord) else {
            continue;
        };
        match &job.result {
            Ok(r) => {
                write!(out, "{}", report::chunk_summary(r, job.t_total_ms))?;
                if args.heightmap {
                    write!(out, "{}", report::heightmap_ascii(&r.buf, &surface))?;
                }
            }
            Err(e) => {
                log::error!("{e}");
                failures += 1;
            }
        }
    }

    if let Some((x, z)) = args.profile {
        let coord = ChunkCoord::containing(x, z);
        if let Some(Ok(r)) = results.get(&coord).map(|job| &job.result) {
            let (ox, oz) = coord.origin();
            writeln!(out, "column ({x}, {z})")?;
            write!(
                out,
                "{}",
                report::column_profile(&r.buf, (x - ox) as usize, (z - oz) as usize)
            )?;
        }
    }

    if failures > 0 {
        return Err(format!("{failures} chunk(s) failed to generate").into());
    }
    Ok(())
}
