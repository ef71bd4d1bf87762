//! Memory-mapped store of named tensor arrays.
//!
//! A store is a directory holding one or more `.safetensors` files; together
//! they form a flat namespace of dense arrays. Files are memory-mapped, so
//! opening a store is cheap and concurrent read-only access from data-loader
//! workers is safe. The store is never written through this interface.

use std::path::Path;

use candle_core::safetensors::MmapedSafetensors;
use candle_core::{Device, Tensor};

use crate::{Error, Result};

/// Read-only, memory-mapped tensor store.
pub struct TensorStore {
    inner: MmapedSafetensors,
    device: Device,
}

impl TensorStore {
    /// Open all `.safetensors` files under `dir`.
    ///
    /// Fails if the directory cannot be read or contains no store files.
    pub fn open(dir: impl AsRef<Path>, device: &Device) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        let entries = std::fs::read_dir(dir)
            .map_err(|e| Error::Store(format!("failed to open {}: {e}", dir.display())))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "safetensors") {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(Error::Store(format!(
                "no .safetensors files in {}",
                dir.display()
            )));
        }
        // Stable namespace regardless of directory iteration order.
        paths.sort();

        // Safety: the store is treated as immutable while mapped; concurrent
        // writers would invalidate the mapping.
        let inner = unsafe {
            MmapedSafetensors::multi(&paths)
                .map_err(|e| Error::Store(format!("failed to mmap {}: {e}", dir.display())))?
        };

        Ok(Self {
            inner,
            device: device.clone(),
        })
    }

    /// Load the named array as a tensor on the store's device.
    pub fn load(&self, name: &str) -> Result<Tensor> {
        self.inner
            .load(name, &self.device)
            .map_err(|e| Error::Store(format!("array '{name}': {e}")))
    }

    /// Shape of the named array, without materializing it.
    pub fn shape(&self, name: &str) -> Result<Vec<usize>> {
        let view = self
            .inner
            .get(name)
            .map_err(|e| Error::Store(format!("array '{name}': {e}")))?;
        Ok(view.shape().to_vec())
    }

    /// Names of all arrays in the store.
    pub fn names(&self) -> Vec<String> {
        self.inner.tensors().into_iter().map(|(n, _)| n).collect()
    }
}
