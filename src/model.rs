//! Low-level network blocks.
//!
//! The building blocks the flow-matching network is assembled from:
//!
//! - [`conv`] — 1-D convolution over channel-last `(B, T, C)` input
//! - [`mlp`] — SwiGLU gated feed-forward, pointwise and convolutional
//! - [`pool`] — gated attention pooling, sequence → single vector

pub mod conv;
pub mod mlp;
pub mod pool;

pub use conv::ChannelLastConv1d;
pub use mlp::{gated_hidden_dim, ConvMlp, Mlp};
pub use pool::AttnNetGated;
