//! VFM Decoding Kernel
//!
//! This crate provides the pure decoding kernel for CALIPSO Vertical Feature
//! Mask records: resolution expansion of packed profile rows into a uniform
//! grid, and extraction of the named sub-fields of each flag word.

pub mod axes;
pub mod decoder;
pub mod expander;
pub mod parallel;

pub use axes::{filter_altitudes, interpolate_positions, nominal_altitudes};
pub use decoder::{
    decode, decode_all, decode_by_name, decode_with, DecodedFeature, FeatureName, FeatureSpec,
    LabelCount, NOT_APPLICABLE,
};
pub use expander::{expand, expand_dyn, expand_with, rows_from_flat, RowOrientation};
pub use parallel::Parallelism;
