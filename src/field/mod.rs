//! Stateless "randomness" for the harbor.
//!
//! Every flicker, wander, corruption and effect pick is a pure function of
//! elapsed time and position, so a replay with the same frame deltas and
//! inputs lands on the same choices.

use std::f64::consts::TAU;

use bracket_noise::prelude::{FastNoise, FractalType, NoiseType};

/// Remaps a `[-1, 1]` oscillator onto `[0, 1]`.
pub fn unit(value: f64) -> f64 {
    (value * 0.5 + 0.5).clamp(0.0, 1.0)
}

pub fn sin01(time: f64, rate: f64) -> f64 {
    unit((time * rate).sin())
}

pub fn cos01(time: f64, rate: f64) -> f64 {
    unit((time * rate).cos())
}

/// `floor(value * len) % len`, with `len == 0` mapping to 0.
pub fn pick(value01: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let scaled = (value01 * len as f64).floor();
    if scaled.is_finite() && scaled > 0.0 {
        (scaled as usize) % len
    } else {
        0
    }
}

/// Index from a sine channel: `pick(sin01(time, rate), len)`.
pub fn select_sin(time: f64, rate: f64, len: usize) -> usize {
    pick(sin01(time, rate), len)
}

pub fn select_cos(time: f64, rate: f64, len: usize) -> usize {
    pick(cos01(time, rate), len)
}

/// Smooth pseudo-noise over space and time in `[0, 1]`. `index` decorrelates
/// independent draws taken at the same place and moment.
pub fn spatial(x: f64, y: f64, time: f64, index: u32) -> f64 {
    let k = f64::from(index);
    let a = (x * 0.0131 + time * 0.71 + k * 1.618).sin();
    let b = (y * 0.0173 - time * 0.53 + k * 2.414).cos();
    let c = ((x + y) * 0.0071 + time * 0.29 + k * 0.577).sin();
    unit((a + b + c) / 3.0)
}

/// Linear map of a `[0, 1]` draw onto `[lo, hi]`.
pub fn range(value01: f64, lo: f64, hi: f64) -> f64 {
    lo + value01.clamp(0.0, 1.0) * (hi - lo)
}

/// Direction in radians drawn from the spatial field.
pub fn heading(x: f64, y: f64, time: f64, index: u32) -> f64 {
    spatial(x, y, time, index) * TAU
}

/// Camera jitter for a given shake magnitude. Recomputed every frame.
pub fn shake_offset(time: f64, magnitude: f32) -> (f32, f32) {
    if magnitude <= 0.0 {
        return (0.0, 0.0);
    }
    let m = f64::from(magnitude);
    (((time * 15.0).sin() * m) as f32, ((time * 17.0).cos() * m) as f32)
}

/// Night brightness of a lamppost at horizontal position `x`, never below 0.2.
pub fn lamp_flicker(time: f64, x: f32, sanity: f32) -> f32 {
    let x = f64::from(x);
    let unease = 1.0 - f64::from(sanity) / 100.0;
    let steady = (time * 4.0 + x * 0.01).sin() * 0.3 + 0.7;
    let nervous = (time * 12.0 + x * 0.03).sin() * unease * 0.4;
    ((steady + nervous) as f32).max(0.2)
}

/// Harbor water heightfield. Seeded once; sampling is pure.
pub struct WaterField {
    noise: FastNoise,
}

impl WaterField {
    pub fn new(seed: u64) -> Self {
        let mut noise = FastNoise::seeded(seed);
        noise.set_noise_type(NoiseType::SimplexFractal);
        noise.set_fractal_type(FractalType::FBM);
        noise.set_fractal_octaves(3);
        noise.set_fractal_gain(0.5);
        noise.set_fractal_lacunarity(2.0);
        noise.set_frequency(0.01);
        Self { noise }
    }

    /// Wave intensity grows from 1 at full sanity to 3 at zero.
    pub fn intensity(sanity: f32) -> f32 {
        1.0 + (100.0 - sanity.clamp(0.0, 100.0)) / 100.0 * 2.0
    }

    /// Surface height in `[-3, 3]` at a world point.
    pub fn height(&self, x: f32, y: f32, time: f64, sanity: f32) -> f32 {
        let t = time as f32;
        let swell = ((x * 0.02 + t * 1.5).sin() + (y * 0.03 + t * 0.8).cos()) * 0.5;
        let chop = self.noise.get_noise3d(x, y, t * 20.0);
        ((swell * 0.6 + chop * 0.4) * Self::intensity(sanity)).clamp(-3.0, 3.0)
    }
}

impl std::fmt::Debug for WaterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaterField").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_is_pure_and_bounded() {
        let mut distinct = std::collections::HashSet::new();
        for i in 0..2_000 {
            let x = i as f64 * 3.7;
            let y = i as f64 * 1.9;
            let t = i as f64 * 0.016;
            let first = spatial(x, y, t, 7);
            let second = spatial(x, y, t, 7);
            assert_eq!(first.to_bits(), second.to_bits());
            assert!((0.0..=1.0).contains(&first));
            distinct.insert((first * 1000.0) as i64);
        }
        assert!(distinct.len() > 100, "field collapsed to {} values", distinct.len());
    }

    #[test]
    fn test_pick_stays_in_bounds() {
        for i in 0..500 {
            let v = sin01(i as f64 * 0.37, 0.73);
            assert!(pick(v, 7) < 7);
        }
        assert_eq!(pick(1.0, 4), 0);
        assert_eq!(pick(0.99, 4), 3);
        assert_eq!(pick(0.5, 0), 0);
        assert_eq!(pick(f64::NAN, 5), 0);
    }

    #[test]
    fn test_range_maps_endpoints() {
        assert_eq!(range(0.0, 12.0, 20.0), 12.0);
        assert_eq!(range(1.0, 12.0, 20.0), 20.0);
        assert_eq!(range(0.5, 150.0, 250.0), 200.0);
    }

    #[test]
    fn test_lamp_flicker_has_floor() {
        for i in 0..1_000 {
            let level = lamp_flicker(i as f64 * 0.05, 870.0, 0.0);
            assert!(level >= 0.2);
            assert!(level <= 1.4);
        }
    }

    #[test]
    fn test_shake_offset_scales_with_magnitude() {
        assert_eq!(shake_offset(3.0, 0.0), (0.0, 0.0));
        let (x, y) = shake_offset(3.0, 10.0);
        assert!(x.abs() <= 10.0 && y.abs() <= 10.0);
        assert_eq!(shake_offset(3.0, 10.0), (x, y));
    }

    #[test]
    fn test_water_height_is_repeatable_and_bounded() {
        let a = WaterField::new(7);
        let b = WaterField::new(7);
        for i in 0..200 {
            let x = 400.0 + i as f32 * 9.0;
            let h = a.height(x, 900.0, i as f64 * 0.1, 25.0);
            assert_eq!(h.to_bits(), b.height(x, 900.0, i as f64 * 0.1, 25.0).to_bits());
            assert!((-3.0..=3.0).contains(&h));
        }
        assert_eq!(WaterField::intensity(100.0), 1.0);
        assert_eq!(WaterField::intensity(0.0), 3.0);
    }
}
