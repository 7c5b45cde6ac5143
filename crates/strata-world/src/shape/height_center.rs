/// Nominal surface in lattice units (half of the 17 vertical samples).
pub const DEPTH_BASE: f64 = 8.5;

const DEPTH_NOISE_SCALE: f64 = 8000.0;

/// Elevation, in lattice units, that the density field bends around.
///
/// Negative noise is damped to 0.3x before the deviation is taken, and the
/// deviation falls off faster below the base (1/1.4) than above it (1/2).
pub fn compute_height_center(noise_sample: f64) -> f64 {
    let mut depth = noise_sample / DEPTH_NOISE_SCALE * 3.0;
    if depth < 0.0 {
        depth *= 0.3;
    }

    let mut deviation = (depth.abs() - 2.0).clamp(-2.0, 1.0);
    if deviation < 0.0 {
        deviation /= 1.4;
    } else {
        deviation /= 2.0;
    }

    DEPTH_BASE + deviation * (DEPTH_BASE / 8.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_noise_baseline() {
        let h = compute_height_center(0.0);
        assert!((h - 6.982_142_857).abs() < 1e-6, "got {h}");
    }

    #[test]
    fn output_stays_within_band() {
        let lo = DEPTH_BASE - (2.0 / 1.4) * (DEPTH_BASE / 8.0);
        let hi = DEPTH_BASE + 0.5 * (DEPTH_BASE / 8.0);
        for i in -200..=200 {
            let h = compute_height_center(f64::from(i) * 250.0);
            assert!(h >= lo - 1e-12 && h <= hi + 1e-12, "{h} outside [{lo}, {hi}]");
        }
        assert!((compute_height_center(1e9) - hi).abs() < 1e-12);
    }

    #[test]
    fn negative_noise_is_gentler() {
        // The same magnitude rises further above the baseline when positive.
        let up = compute_height_center(6000.0);
        let down = compute_height_center(-6000.0);
        assert!(up > down);
    }
}
