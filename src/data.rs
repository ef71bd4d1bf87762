//! Dataset loading for precomputed (extracted) features.
//!
//! ## Components
//!
//! - [`index`] — tab-separated (id, caption) index file
//! - [`store`] — memory-mapped safetensors store of named arrays
//! - [`noise`] — seeded standard-normal tensor source
//! - [`extracted_audio`] — the [`ExtractedAudio`] dataset tying them together

pub mod extracted_audio;
pub mod index;
pub mod noise;
pub mod store;

pub use extracted_audio::{ExtractedAudio, ModalityFeature, Sample};
pub use index::TsvIndex;
pub use noise::NoiseGenerator;
pub use store::TensorStore;
