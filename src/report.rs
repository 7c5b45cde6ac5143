//! Plain-text chunk reports.

use std::fmt::Write;

use strata_blocks::{Block, BlockMatcher};
use strata_chunk::{ChunkBuf, ChunkGenerateResult};
use strata_world::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, CHUNK_VOLUME};

const HEIGHT_RAMP: &[u8] = b".:-=+*#%@";

pub fn chunk_summary(result: &ChunkGenerateResult, t_total_ms: u32) -> String {
    let mut s = String::new();
    let m = &result.metrics;
    let _ = writeln!(
        s,
        "chunk {} ({:?}) lattice {}us, columns {}us, blocks {}us (total {}us), job {}ms",
        result.buf.coord,
        result.occupancy,
        m.lattice_us,
        m.columns_us,
        m.blocks_us,
        m.total_us(),
        t_total_ms
    );
    let counts = result.buf.counts();
    for block in Block::ALL {
        let n = counts[block.id() as usize];
        let pct = n as f64 * 100.0 / CHUNK_VOLUME as f64;
        let _ = writeln!(s, "  {:<17} {:>6} {:>6.2}%", block.name(), n, pct);
    }
    s
}

/// One character per column, rows are z and characters are x. Liquid and ice
/// surfaces show as `~` and `_`; stone surfaces use a ramp from low to high.
pub fn heightmap_ascii(buf: &ChunkBuf, matcher: &BlockMatcher) -> String {
    let mut s = String::with_capacity((CHUNK_SIZE_X + 1) * CHUNK_SIZE_Z);
    for z in 0..CHUNK_SIZE_Z {
        for x in 0..CHUNK_SIZE_X {
            let c = match buf.surface_height(x, z, matcher) {
                None => ' ',
                Some(y) => match buf.get_local(x, y, z) {
                    Block::StationaryWater => '~',
                    Block::Ice => '_',
                    _ => HEIGHT_RAMP[y * HEIGHT_RAMP.len() / CHUNK_SIZE_Y] as char,
                },
            };
            s.push(c);
        }
        s.push('\n');
    }
    s
}

/// Runs of identical blocks in a column, listed top-down.
pub fn column_profile(buf: &ChunkBuf, lx: usize, lz: usize) -> String {
    let blocks: Vec<Block> = buf.column(lx, lz).collect();
    let mut s = String::new();
    let mut top = CHUNK_SIZE_Y - 1;
    while let Some(&block) = blocks.get(top) {
        let mut bottom = top;
        while bottom > 0 && blocks[bottom - 1] == block {
            bottom -= 1;
        }
        let _ = writeln!(s, "  y {top:>3}..={bottom:<3} {block}");
        if bottom == 0 {
            break;
        }
        top = bottom - 1;
    }
    s
}
