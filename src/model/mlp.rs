//! SwiGLU gated feed-forward blocks.
//!
//! ```text
//! out = w2( SiLU(w1(x)) ⊙ w3(x) )
//! ```
//!
//! All three projections are bias-free. The hidden width is scaled to 2/3 of
//! the requested size and rounded up to a multiple of `multiple_of`, keeping
//! the parameter count close to a plain feed-forward layer despite the extra
//! gating projection.
//!
//! [`Mlp`] mixes pointwise; [`ConvMlp`] swaps the linears for channel-last
//! convolutions so the feed-forward mixes local sequence context too.

use candle_core::{Module, Tensor};
use candle_nn::{Conv1dConfig, VarBuilder};

use super::conv::ChannelLastConv1d;
use crate::Result;

/// Hidden-width granularity used throughout the network.
pub const DEFAULT_MULTIPLE_OF: usize = 256;

/// Effective hidden width: `ceil((2/3) * hidden_dim / multiple_of) * multiple_of`.
pub fn gated_hidden_dim(hidden_dim: usize, multiple_of: usize) -> usize {
    let hidden = 2 * hidden_dim / 3;
    multiple_of * ((hidden + multiple_of - 1) / multiple_of)
}

/// Pointwise SwiGLU feed-forward.
#[derive(Debug, Clone)]
pub struct Mlp {
    w1: candle_nn::Linear,
    w2: candle_nn::Linear,
    w3: candle_nn::Linear,
}

impl Mlp {
    pub fn new(
        in_dim: usize,
        out_dim: usize,
        hidden_dim: usize,
        multiple_of: usize,
        vb: VarBuilder,
    ) -> Result<Self> {
        let hidden = gated_hidden_dim(hidden_dim, multiple_of);
        Ok(Self {
            w1: candle_nn::linear_no_bias(in_dim, hidden, vb.pp("w1"))?,
            w2: candle_nn::linear_no_bias(hidden, out_dim, vb.pp("w2"))?,
            w3: candle_nn::linear_no_bias(in_dim, hidden, vb.pp("w3"))?,
        })
    }

    pub fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let gate = candle_nn::Activation::Silu.forward(&self.w1.forward(x)?)?;
        let value = self.w3.forward(x)?;
        self.w2.forward(&(gate * value)?).map_err(Into::into)
    }
}

/// Convolutional SwiGLU feed-forward over `(B, T, dim)` input.
///
/// Same gating as [`Mlp`] with each projection replaced by a
/// [`ChannelLastConv1d`], so every position mixes a `kernel_size` window of
/// its neighbors. Symmetric padding keeps the sequence length.
#[derive(Debug, Clone)]
pub struct ConvMlp {
    w1: ChannelLastConv1d,
    w2: ChannelLastConv1d,
    w3: ChannelLastConv1d,
}

impl ConvMlp {
    pub fn new(
        dim: usize,
        hidden_dim: usize,
        multiple_of: usize,
        kernel_size: usize,
        padding: usize,
        vb: VarBuilder,
    ) -> Result<Self> {
        let hidden = gated_hidden_dim(hidden_dim, multiple_of);
        let cfg = Conv1dConfig {
            padding,
            ..Default::default()
        };
        Ok(Self {
            w1: ChannelLastConv1d::new_no_bias(dim, hidden, kernel_size, cfg, vb.pp("w1"))?,
            w2: ChannelLastConv1d::new_no_bias(hidden, dim, kernel_size, cfg, vb.pp("w2"))?,
            w3: ChannelLastConv1d::new_no_bias(dim, hidden, kernel_size, cfg, vb.pp("w3"))?,
        })
    }

    pub fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let gate = candle_nn::Activation::Silu.forward(&self.w1.forward(x)?)?;
        let value = self.w3.forward(x)?;
        self.w2.forward(&(gate * value)?).map_err(Into::into)
    }
}
