//! Histogram color quantization.
//!
//! Deliberately not k-means: one pass over the samples, no iteration,
//! fully deterministic. The downscale in [`crate::sample`] already did the
//! smoothing that k-means would otherwise be asked to do.

mod histogram;

pub use histogram::{quantize, ColorCluster, ColorQuantizer, MAX_CLUSTERS};
