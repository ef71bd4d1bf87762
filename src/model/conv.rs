//! 1-D convolution over channel-last input.
//!
//! The transformer blocks keep activations as `(B, T, C)`, but conv1d wants
//! `(B, C, T)`. This wrapper transposes in, convolves, and transposes back,
//! so it drops into the same positions a linear layer would.

use candle_core::{Module, Tensor};
use candle_nn::{Conv1dConfig, VarBuilder};

use crate::Result;

/// Conv1d on `(B, T, C_in)` input, producing `(B, T', C_out)`.
///
/// Numerically identical to the plain conv on the transposed layout.
#[derive(Debug, Clone)]
pub struct ChannelLastConv1d {
    conv: candle_nn::Conv1d,
}

impl ChannelLastConv1d {
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        kernel_size: usize,
        cfg: Conv1dConfig,
        vb: VarBuilder,
    ) -> Result<Self> {
        let conv = candle_nn::conv1d(in_channels, out_channels, kernel_size, cfg, vb)?;
        Ok(Self { conv })
    }

    pub fn new_no_bias(
        in_channels: usize,
        out_channels: usize,
        kernel_size: usize,
        cfg: Conv1dConfig,
        vb: VarBuilder,
    ) -> Result<Self> {
        let conv = candle_nn::conv1d_no_bias(in_channels, out_channels, kernel_size, cfg, vb)?;
        Ok(Self { conv })
    }
}

impl Module for ChannelLastConv1d {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        // [B, T, C] → [B, C, T] for Conv1d, then back.
        let x = x.transpose(1, 2)?;
        let x = self.conv.forward(&x)?;
        x.transpose(1, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device};
    use candle_nn::VarMap;

    #[test]
    fn output_shape_same_padding() {
        let dev = Device::Cpu;
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &dev);
        let cfg = Conv1dConfig {
            padding: 1,
            ..Default::default()
        };
        let conv = ChannelLastConv1d::new(4, 6, 3, cfg, vb.pp("conv")).unwrap();
        let x = Tensor::randn(0f32, 1.0, (2, 10, 4), &dev).unwrap();
        let y = conv.forward(&x).unwrap();
        assert_eq!(y.dims(), &[2, 10, 6]);
    }

    #[test]
    fn matches_standard_conv_on_transposed_input() {
        let dev = Device::Cpu;
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &dev);
        let cfg = Conv1dConfig {
            padding: 1,
            ..Default::default()
        };
        // Same VarBuilder path, so both layers share the exact same weights.
        let channel_last = ChannelLastConv1d::new(4, 6, 3, cfg, vb.pp("conv")).unwrap();
        let standard = candle_nn::conv1d(4, 6, 3, cfg, vb.pp("conv")).unwrap();

        let x = Tensor::randn(0f32, 1.0, (2, 10, 4), &dev).unwrap();
        let got = channel_last.forward(&x).unwrap();
        let want = standard
            .forward(&x.transpose(1, 2).unwrap())
            .unwrap()
            .transpose(1, 2)
            .unwrap();

        let diff: f32 = (&got - &want)
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
