//! Date normalization and document date lookup.

pub mod locator;
pub mod normalizer;

pub use locator::{candidates, locate, locate_with_provenance};
pub use normalizer::normalize;
