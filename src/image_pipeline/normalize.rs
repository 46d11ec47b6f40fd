//! Normalization module
//!
//! Turns a decoded FITS array into values in [0, 1] through an ordered
//! chain of optional statistical steps.

mod pipeline;
pub mod types;

pub use pipeline::normalize;
pub use types::{Normalized, NormalizedImage, PipelineConfig, PipelineConfigBuilder, RenderMode};
