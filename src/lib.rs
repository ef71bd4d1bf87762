//! MMAudio training-data pipeline and low-level network blocks in pure Rust.
//!
//! A candle-based implementation of the MMAudio extracted-feature dataset and
//! the reusable layers its flow-matching network is assembled from. The
//! dataset side reads precomputed latents from a memory-mapped safetensors
//! store; the model side provides the channel-last convolution, gated
//! feed-forward and attention-pooling blocks used inside the larger network.
//!
//! ## Modules
//!
//! - [`config`] — expected feature dimensions ([`config::DataDim`])
//! - [`data`] — TSV index, mmap tensor store, seeded noise, the
//!   [`data::ExtractedAudio`] dataset
//! - [`model`] — channel-last conv, SwiGLU feed-forward, gated attention pooling

pub mod config;
pub mod data;
pub mod model;

mod error;

pub use error::{Error, Result};
