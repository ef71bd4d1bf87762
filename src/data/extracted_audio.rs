//! Dataset of precomputed audio latents and text features.
//!
//! Each example pairs a row of the TSV index (id, caption) with row slices of
//! the memory-mapped arrays. Audio features are "re-noised" from stored
//! mean/std arrays once at construction:
//!
//! ```text
//! audio_features = audio_feature_mean + audio_feature_std * N(0, 1)
//! ```
//!
//! with a fixed-seed draw, so two loads of the same store produce identical
//! features. This dataset variant has no video; the clip/sync slots are
//! explicit placeholders.

use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, IndexOp, Tensor, D};

use crate::config::DataDim;
use crate::data::index::TsvIndex;
use crate::data::noise::NoiseGenerator;
use crate::data::store::TensorStore;
use crate::{Error, Result};

/// Seed for the construction-time noise draw. Fixed so that "augmented"
/// features are reproducible across runs and process restarts.
pub const DEFAULT_NOISE_SEED: u64 = 42;

/// A per-modality feature slot.
///
/// Every slot always holds a fixed-shape tensor; a [`Placeholder`] marks a
/// modality this dataset variant does not carry, so downstream code cannot
/// mistake the zeros for real signal.
///
/// [`Placeholder`]: ModalityFeature::Placeholder
#[derive(Debug, Clone)]
pub enum ModalityFeature {
    /// Real signal loaded from the store.
    Present(Tensor),
    /// All-zero stand-in for an absent modality.
    Placeholder(Tensor),
}

impl ModalityFeature {
    /// The feature tensor, whether real or placeholder.
    pub fn tensor(&self) -> &Tensor {
        match self {
            Self::Present(t) | Self::Placeholder(t) => t,
        }
    }

    /// Whether the modality is actually present.
    pub fn exists(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// One example: index metadata plus row views into the preloaded arrays.
#[derive(Debug, Clone)]
pub struct Sample {
    pub id: String,
    pub caption: String,
    /// Latent mean, `(latent_seq_len, ...)`.
    pub a_mean: Tensor,
    /// Latent std, same shape as `a_mean`.
    pub a_std: Tensor,
    pub clip_features: ModalityFeature,
    pub sync_features: ModalityFeature,
    pub text_features: ModalityFeature,
    pub audio_features: ModalityFeature,
}

impl Sample {
    pub fn video_exist(&self) -> bool {
        self.clip_features.exists()
    }

    pub fn text_exist(&self) -> bool {
        self.text_features.exists()
    }

    pub fn audio_exist(&self) -> bool {
        self.audio_features.exists()
    }
}

/// Random-access dataset over an extracted-feature store.
#[derive(Debug)]
pub struct ExtractedAudio {
    index: TsvIndex,
    mean: Tensor,
    std: Tensor,
    text_features: Tensor,
    audio_features: Tensor,
    fake_clip_features: Tensor,
    fake_sync_features: Tensor,
}

impl ExtractedAudio {
    /// Load a dataset with the default fixed noise seed.
    pub fn load(
        tsv_path: impl AsRef<Path>,
        mmap_dir: impl AsRef<Path>,
        data_dim: &DataDim,
        device: &Device,
    ) -> Result<Self> {
        Self::load_with_noise(
            tsv_path,
            mmap_dir,
            data_dim,
            device,
            NoiseGenerator::seeded(DEFAULT_NOISE_SEED),
        )
    }

    /// Load a dataset with an explicit noise source.
    ///
    /// Tests substitute a controlled generator here; production code uses
    /// [`ExtractedAudio::load`].
    pub fn load_with_noise(
        tsv_path: impl AsRef<Path>,
        mmap_dir: impl AsRef<Path>,
        data_dim: &DataDim,
        device: &Device,
        mut noise: NoiseGenerator,
    ) -> Result<Self> {
        let index = TsvIndex::load(tsv_path)?;

        let mmap_dir = mmap_dir.as_ref();
        tracing::info!("loading precomputed mmap store from {}", mmap_dir.display());
        let store = TensorStore::open(mmap_dir, device)?;
        let mean = store.load("mean")?;
        let std = store.load("std")?;
        let text_features = store.load("text_features")?;
        let audio_feature_mean = store.load("audio_feature_mean")?;
        let audio_feature_std = store.load("audio_feature_std")?;

        let randn = noise.standard_normal(audio_feature_mean.dims(), device)?;
        let audio_features = (audio_feature_mean + (audio_feature_std * randn)?)?;

        tracing::info!("loaded {} samples from {}", index.len(), mmap_dir.display());
        tracing::info!("loaded mean: {:?}", mean.dims());
        tracing::info!("loaded std: {:?}", std.dims());
        tracing::info!("loaded text features: {:?}", text_features.dims());
        tracing::info!("loaded audio features: {:?}", audio_features.dims());

        check_dim("latent_seq_len", mean.dim(1)?, data_dim.latent_seq_len)?;
        check_dim("latent_seq_len", std.dim(1)?, data_dim.latent_seq_len)?;
        check_dim("text_seq_len", text_features.dim(1)?, data_dim.text_seq_len)?;
        check_dim("text_dim", text_features.dim(D::Minus1)?, data_dim.text_dim)?;

        // The index and the store describe the same examples; a row-count
        // disagreement means one of the two inputs is stale.
        check_dim("mean.rows", mean.dim(0)?, index.len())?;
        check_dim("std.rows", std.dim(0)?, index.len())?;
        check_dim("text_features.rows", text_features.dim(0)?, index.len())?;
        check_dim("audio_features.rows", audio_features.dim(0)?, index.len())?;

        let fake_clip_features = Tensor::zeros(
            (data_dim.clip_seq_len, data_dim.clip_dim),
            DType::F32,
            device,
        )?;
        let fake_sync_features = Tensor::zeros(
            (data_dim.sync_seq_len, data_dim.sync_dim),
            DType::F32,
            device,
        )?;

        Ok(Self {
            index,
            mean,
            std,
            text_features,
            audio_features,
            fake_clip_features,
            fake_sync_features,
        })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The example at `idx`.
    ///
    /// Tensor fields are row slices of the preloaded arrays; placeholders are
    /// shared across all examples.
    pub fn get(&self, idx: usize) -> Result<Sample> {
        let record = self.index.get(idx).ok_or(Error::OutOfRange {
            index: idx,
            len: self.index.len(),
        })?;
        Ok(Sample {
            id: record.id.clone(),
            caption: record.caption.clone(),
            a_mean: self.mean.i(idx)?,
            a_std: self.std.i(idx)?,
            clip_features: ModalityFeature::Placeholder(self.fake_clip_features.clone()),
            sync_features: ModalityFeature::Placeholder(self.fake_sync_features.clone()),
            text_features: ModalityFeature::Present(self.text_features.i(idx)?),
            audio_features: ModalityFeature::Present(self.audio_features.i(idx)?),
        })
    }

    /// Per-feature mean and (unbiased) std of the latent means, reduced over
    /// the batch and sequence dimensions. Used for global normalization.
    pub fn compute_latent_stats(&self) -> Result<(Tensor, Tensor)> {
        let (n, t, c) = self.mean.dims3()?;
        let flat = self.mean.reshape((n * t, c))?;
        let mean = flat.mean(0)?;
        let centered = flat.broadcast_sub(&mean)?;
        let denom = (n * t - 1).max(1) as f64;
        let std = (centered.sqr()?.sum(0)? / denom)?.sqrt()?;
        Ok((mean, std))
    }

    /// The non-placeholder arrays, keyed by store name, for bulk
    /// serialization or inspection.
    pub fn export_tensor_bundle(&self) -> HashMap<String, Tensor> {
        HashMap::from([
            ("mean".to_string(), self.mean.clone()),
            ("std".to_string(), self.std.clone()),
            ("text_features".to_string(), self.text_features.clone()),
            ("audio_features".to_string(), self.audio_features.clone()),
        ])
    }
}

fn check_dim(field: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Shape {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
