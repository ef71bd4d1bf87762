//! Seeded standard-normal tensor source.
//!
//! The dataset derives its "augmented" audio features from stored mean/std
//! arrays plus a normal draw. The draw must be reproducible across runs and
//! process restarts, so the generator is an explicit, injectable object
//! seeded with a fixed value rather than ambient global state.
//!
//! Uses `ChaCha8Rng` for reproducible noise generation.

use candle_core::{Device, Tensor};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::Result;

/// Deterministic source of standard-normal tensors.
pub struct NoiseGenerator {
    rng: ChaCha8Rng,
}

impl NoiseGenerator {
    /// Create a generator from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw a tensor of i.i.d. `N(0, 1)` samples with the given shape.
    pub fn standard_normal(&mut self, shape: &[usize], device: &Device) -> Result<Tensor> {
        let count: usize = shape.iter().product();
        let samples: Vec<f32> = (&mut self.rng)
            .sample_iter(StandardNormal)
            .take(count)
            .collect();
        Tensor::from_vec(samples, shape, device).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_draw() {
        let dev = Device::Cpu;
        let a = NoiseGenerator::seeded(42)
            .standard_normal(&[2, 3, 4], &dev)
            .unwrap();
        let b = NoiseGenerator::seeded(42)
            .standard_normal(&[2, 3, 4], &dev)
            .unwrap();
        assert_eq!(
            a.to_vec3::<f32>().unwrap(),
            b.to_vec3::<f32>().unwrap(),
            "same seed must reproduce the draw bit-for-bit"
        );
    }

    #[test]
    fn different_seeds_differ() {
        let dev = Device::Cpu;
        let a = NoiseGenerator::seeded(42)
            .standard_normal(&[16], &dev)
            .unwrap();
        let b = NoiseGenerator::seeded(43)
            .standard_normal(&[16], &dev)
            .unwrap();
        assert_ne!(a.to_vec1::<f32>().unwrap(), b.to_vec1::<f32>().unwrap());
    }

    #[test]
    fn draw_has_plausible_moments() {
        let dev = Device::Cpu;
        let x = NoiseGenerator::seeded(7)
            .standard_normal(&[10_000], &dev)
            .unwrap();
        let mean: f32 = x.mean_all().unwrap().to_scalar().unwrap();
        let var: f32 = x.sqr().unwrap().mean_all().unwrap().to_scalar().unwrap();
        assert!(mean.abs() < 0.05, "mean={mean}");
        assert!((var - 1.0).abs() < 0.05, "var={var}");
    }
}
