pub const CHAOS_MIN: f64 = 0.5;
pub const CHAOS_MAX: f64 = 1.5;

const CHAOS_NOISE_SCALE: f64 = 512.0;

/// Roughness of a column.
///
/// Cold or dry columns collapse toward `CHAOS_MIN` no matter what the noise
/// says; only hot and wet columns let the noise push chaos up to `CHAOS_MAX`.
pub fn compute_chaos(noise_sample: f64, rainfall: f64, temperature: f64) -> f64 {
    let factor = 1.0 - (1.0 - rainfall * temperature).powi(4);
    let chaos = (noise_sample / CHAOS_NOISE_SCALE + 0.5) * factor + 0.5;
    chaos.clamp(CHAOS_MIN, CHAOS_MAX)
}
