//! Public API for the cover-palette crate.
//!
//! This module provides the high-level API: [`CoverAnalyzer`] builder,
//! [`Analysis`] result and [`AnalyzeError`] unified error type.

mod builder;
mod error;

pub use builder::{Analysis, CoverAnalyzer};
pub use error::AnalyzeError;
