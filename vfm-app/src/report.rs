//! 解码结果报告

use ndarray::Dimension;
use serde::Serialize;
use vfm_core::FlagWord;
use vfm_kernel::{DecodedFeature, FeatureName, LabelCount};

/// 单个特征的统计报告
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport {
    pub feature: FeatureName,
    pub description: &'static str,
    pub vmin: i16,
    pub vmax: i16,
    pub shape: Vec<usize>,
    pub counts: Vec<LabelCount>,
}

impl<D: Dimension> From<&DecodedFeature<D>> for FeatureReport {
    fn from(decoded: &DecodedFeature<D>) -> Self {
        Self {
            feature: decoded.feature,
            description: decoded.description,
            vmin: decoded.vmin,
            vmax: decoded.vmax,
            shape: decoded.shape().to_vec(),
            counts: decoded.counts(),
        }
    }
}

/// 单个标志字的一个特征
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordField {
    pub feature: FeatureName,
    pub value: i16,
    pub label: &'static str,
}

/// 解码单个标志字的全部特征
pub fn inspect_word(word: FlagWord) -> Vec<WordField> {
    FeatureName::ALL
        .iter()
        .map(|&feature| {
            let spec = feature.spec();
            let value = spec.decode_word(word);
            WordField {
                feature,
                value,
                label: spec.label(value).unwrap_or("?"),
            }
        })
        .collect()
}

/// 解析十进制、`0x`或`0b`前缀的标志字字面量
pub fn parse_word(s: &str) -> Result<FlagWord, String> {
    let clean = s.trim().replace('_', "");
    let lower = clean.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        FlagWord::from_str_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        FlagWord::from_str_radix(bin, 2)
    } else {
        lower.parse::<FlagWord>()
    };
    parsed.map_err(|e| format!("Invalid flag word '{s}': {e}"))
}
