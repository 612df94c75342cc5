//! VFM Core Library
//!
//! This crate provides the core data layout for CALIPSO Vertical Feature Mask
//! (VFM) records: the bit layout of the 16-bit flag words and the band layout
//! of the 5515-word profile rows.

pub mod error;
pub mod flag_word;
pub mod layout;

// 导出错误类型
pub use error::VfmError;

// 导出布局类型，便于其他模块使用
pub use flag_word::*;
pub use layout::*;
