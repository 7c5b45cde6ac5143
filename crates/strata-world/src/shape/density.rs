use crate::interp::lerp;
use crate::CHUNK_SIZE_Y;
use crate::lattice::PIECE_HEIGHT;

pub const HEIGHT_STRETCH: f64 = 12.0;
pub const LIMIT_SCALE: f64 = 512.0;
pub const MAIN_SCALE: f64 = 20.0;
pub const TAPER_BASE: f64 = 13.0;

const BELOW_CENTER_STEEPNESS: f64 = 4.0;
const TAPER_SPAN: f64 = 3.0;
const TAPER_FLOOR: f64 = 10.0;

/// Block Y converted to lattice units.
#[inline]
pub fn lattice_height(y: i32) -> f64 {
    f64::from(y) / PIECE_HEIGHT as f64
}

/// The only place biome data touches the shape: higher chaos shrinks the
/// height-center pull so solid ground reaches further from the surface.
#[inline]
pub fn apply_chaos(calmness: f64, chaos: f64) -> f64 {
    calmness / chaos
}

/// Blend between the lower and upper limit noise, steered by the main noise.
#[inline]
pub fn blend_limits(noise_lower: f64, noise_upper: f64, noise_main: f64) -> f64 {
    let lower = noise_lower / LIMIT_SCALE;
    let upper = noise_upper / LIMIT_SCALE;
    let main = (noise_main / MAIN_SCALE).clamp(0.0, 1.0);
    lerp(main, lower, upper)
}

/// Zero up to `TAPER_BASE`, then grows by one per three lattice units.
/// The growth is not capped; inside a 128-block chunk it peaks just under 1.
#[inline]
pub fn taper(y: f64) -> f64 {
    (y.max(TAPER_BASE) - TAPER_BASE) / TAPER_SPAN
}

/// Continuous density at block height `y` of a column. Positive is solid.
pub fn compute_density(
    y: i32,
    chaos: f64,
    height_center: f64,
    noise_lower: f64,
    noise_upper: f64,
    noise_main: f64,
) -> f64 {
    debug_assert!(
        (0..CHUNK_SIZE_Y as i32).contains(&y),
        "block y {y} outside chunk"
    );
    let y = lattice_height(y);

    let mut dist = y - height_center;
    if dist < 0.0 {
        dist *= BELOW_CENTER_STEEPNESS;
    }
    let calmness = dist * HEIGHT_STRETCH;

    let mut density =
        blend_limits(noise_lower, noise_upper, noise_main) - apply_chaos(calmness, chaos);

    let taper = taper(y);
    density *= 1.0 - taper;
    density -= TAPER_FLOOR * taper;
    density
}
