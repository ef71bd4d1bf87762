//! Expected feature dimensions for the extracted-feature dataset.
//!
//! Mirrors the `data_dim` mapping the training configuration passes to the
//! dataset. Every field is a hard shape contract: tensors loaded from the
//! store are validated against these at construction time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Expected dimensions of the precomputed feature arrays.
///
/// Deserialized from JSON; a missing key fails deserialization, which is how
/// "missing required configuration key" surfaces to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDim {
    /// Sequence length of the audio latents (dim 1 of `mean`/`std`).
    pub latent_seq_len: usize,
    /// Sequence length of the text features (dim 1 of `text_features`).
    pub text_seq_len: usize,
    /// Feature width of the text features (last dim of `text_features`).
    pub text_dim: usize,
    /// Sequence length of the (placeholder) clip features.
    pub clip_seq_len: usize,
    /// Feature width of the (placeholder) clip features.
    pub clip_dim: usize,
    /// Sequence length of the (placeholder) sync features.
    pub sync_seq_len: usize,
    /// Feature width of the (placeholder) sync features.
    pub sync_dim: usize,
}

impl DataDim {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
