//! Gated attention pooling: `(B, T, H)` → `(B, H)`.
//!
//! Each position gets a scalar score (two-layer projection with tanh) and a
//! gate vector (projection with sigmoid). Their product is softmax-normalized
//! over the sequence dimension, and the output is the weighted sum of the
//! input. Ordering only matters through the weights, and the weights sum to 1
//! per batch row.

use candle_core::{Module, Tensor};
use candle_nn::VarBuilder;

use crate::Result;

/// Gated attention pooler.
#[derive(Debug, Clone)]
pub struct AttnNetGated {
    attn_fc1: candle_nn::Linear,
    attn_fc2: candle_nn::Linear,
    gate_fc: candle_nn::Linear,
}

impl AttnNetGated {
    pub fn new(hidden_dim: usize, vb: VarBuilder) -> Result<Self> {
        // Weight paths match the original Sequential layout.
        Ok(Self {
            attn_fc1: candle_nn::linear(hidden_dim, hidden_dim, vb.pp("attention.0"))?,
            attn_fc2: candle_nn::linear(hidden_dim, 1, vb.pp("attention.2"))?,
            gate_fc: candle_nn::linear(hidden_dim, hidden_dim, vb.pp("gate.0"))?,
        })
    }

    /// Normalized pooling weights for `x: [B, T, H]`, shape `[B, T, H]`.
    ///
    /// Softmax runs over the sequence dimension, so the weights sum to 1 per
    /// batch row (and per hidden channel).
    pub fn weights(&self, x: &Tensor) -> Result<Tensor> {
        let scores = self
            .attn_fc2
            .forward(&self.attn_fc1.forward(x)?.tanh()?)?; // [B, T, 1]
        let gates = candle_nn::ops::sigmoid(&self.gate_fc.forward(x)?)?; // [B, T, H]
        let gated = scores.broadcast_mul(&gates)?;
        candle_nn::ops::softmax(&gated, 1).map_err(Into::into)
    }

    /// Pool `x: [B, T, H]` down to `[B, H]`.
    pub fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let weights = self.weights(x)?;
        (weights * x)?.sum(1).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device};
    use candle_nn::VarMap;

    fn pooler(hidden: usize, dev: &Device) -> AttnNetGated {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, dev);
        AttnNetGated::new(hidden, vb.pp("pool")).unwrap()
    }

    #[test]
    fn output_shape_independent_of_seq_len() {
        let dev = Device::Cpu;
        let pool = pooler(16, &dev);
        for t in [1, 5, 33] {
            let x = Tensor::randn(0f32, 1.0, (2, t, 16), &dev).unwrap();
            let y = pool.forward(&x).unwrap();
            assert_eq!(y.dims(), &[2, 16], "seq_len={t}");
        }
    }

    #[test]
    fn weights_sum_to_one() {
        let dev = Device::Cpu;
        let pool = pooler(8, &dev);
        let x = Tensor::randn(0f32, 1.0, (3, 12, 8), &dev).unwrap();
        let w = pool.weights(&x).unwrap();
        assert_eq!(w.dims(), &[3, 12, 8]);
        let sums = w.sum(1).unwrap().to_vec2::<f32>().unwrap();
        for row in sums {
            for s in row {
                assert!((s - 1.0).abs() < 1e-5, "weight sum {s}");
            }
        }
    }

    #[test]
    fn single_position_pools_to_itself() {
        // With T = 1 the softmax weight is exactly 1, so pooling returns the input.
        let dev = Device::Cpu;
        let pool = pooler(8, &dev);
        let x = Tensor::randn(0f32, 1.0, (2, 1, 8), &dev).unwrap();
        let y = pool.forward(&x).unwrap();
        let want = x.squeeze(1).unwrap();
        let diff: f32 = (&y - &want)
            .unwrap()
            .abs()
            .unwrap()
            .max_all()
            .unwrap()
            .to_scalar()
            .unwrap();
        assert!(diff < 1e-6, "max abs diff {diff}");
    }
}
