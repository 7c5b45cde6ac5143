//! Per-column and per-block terrain shaping.
//!
//! Vertical positions inside this module are measured in lattice units
//! (one unit per vertical piece, i.e. eight blocks) so that the height center
//! and the taper line up with the lattice they were tuned against.

mod chaos;
mod density;
mod height_center;
mod select;

pub use chaos::{CHAOS_MAX, CHAOS_MIN, compute_chaos};
pub use density::{
    HEIGHT_STRETCH, LIMIT_SCALE, MAIN_SCALE, TAPER_BASE, apply_chaos, blend_limits,
    compute_density, lattice_height, taper,
};
pub use height_center::{DEPTH_BASE, compute_height_center};
pub use select::{SEA_LEVEL, select_block};
