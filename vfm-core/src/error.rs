//! VFM错误定义

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfmError {
    /// 数组维度或长度不符合5515字的行布局
    #[error("Shape error: {0}")]
    Shape(String),
    /// 不支持的特征名
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
}
