//! 特征解码模块
//!
//! 从16位标志字中提取十个具名子字段之一：
//! - 数据驱动的特征定义表（bit字段、有效性规则、取值范围、标签）
//! - 基础特征类型决定的子类型有效性掩码（哨兵值 -1）
//! - 解码结果的标签查找与统计

pub mod core;
pub mod feature;

pub use self::core::{decode, decode_all, decode_by_name, decode_with, DecodedFeature, LabelCount};
pub use feature::{Adjust, FeatureName, FeatureSpec, Validity, NOT_APPLICABLE};
