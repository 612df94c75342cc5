//! 特征定义表
//!
//! 每个特征名对应一个静态条目：bit字段、有效性规则、取值范围和标签表。
//! 所有特征共用`FeatureSpec::decode_word`这一个提取例程。

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use vfm_core::{
    BitField, FeatureType, FlagWord, VfmError, AVERAGING, FEATURE_TYPE, FEATURE_TYPE_QA, PHASE,
    PHASE_QA, SUBTYPE, SUBTYPE_QA,
};

/// "不适用"哨兵值：样本的基础特征类型与该特征不匹配
pub const NOT_APPLICABLE: i16 = -1;

/// 可解码的特征名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    Type,
    TypeQa,
    Phase,
    PhaseQa,
    AerosolSubtype,
    CloudSubtype,
    PscSubtype,
    Subtype,
    SubtypeQa,
    Averaging,
}

impl FeatureName {
    /// 全部特征，按固定顺序
    pub const ALL: [FeatureName; 10] = [
        FeatureName::Type,
        FeatureName::TypeQa,
        FeatureName::Phase,
        FeatureName::PhaseQa,
        FeatureName::AerosolSubtype,
        FeatureName::CloudSubtype,
        FeatureName::PscSubtype,
        FeatureName::Subtype,
        FeatureName::SubtypeQa,
        FeatureName::Averaging,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FeatureName::Type => "type",
            FeatureName::TypeQa => "type_qa",
            FeatureName::Phase => "phase",
            FeatureName::PhaseQa => "phase_qa",
            FeatureName::AerosolSubtype => "aerosol_subtype",
            FeatureName::CloudSubtype => "cloud_subtype",
            FeatureName::PscSubtype => "psc_subtype",
            FeatureName::Subtype => "subtype",
            FeatureName::SubtypeQa => "subtype_qa",
            FeatureName::Averaging => "averaging",
        }
    }

    /// 该特征的解码定义
    pub fn spec(self) -> &'static FeatureSpec {
        &FEATURES[self as usize]
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = VfmError;

    /// 不区分大小写，同时接受`typeqa`、`aerosol`、`psc`等简写
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s.trim().to_ascii_lowercase().as_str() {
            "type" => FeatureName::Type,
            "type_qa" | "typeqa" => FeatureName::TypeQa,
            "phase" => FeatureName::Phase,
            "phase_qa" | "phaseqa" => FeatureName::PhaseQa,
            "aerosol_subtype" | "aerosol" => FeatureName::AerosolSubtype,
            "cloud_subtype" | "cloud" => FeatureName::CloudSubtype,
            "psc_subtype" | "psc" => FeatureName::PscSubtype,
            "subtype" => FeatureName::Subtype,
            "subtype_qa" | "subtypeqa" => FeatureName::SubtypeQa,
            "averaging" => FeatureName::Averaging,
            _ => return Err(VfmError::UnsupportedFeature(s.to_string())),
        };
        Ok(name)
    }
}

/// 字段有效性规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// 对所有样本有效
    Always,
    /// 仅当基础特征类型属于给定集合时有效，否则为`NOT_APPLICABLE`
    Only(&'static [FeatureType]),
}

impl Validity {
    pub fn admits(self, base: FeatureType) -> bool {
        match self {
            Validity::Always => true,
            Validity::Only(types) => types.contains(&base),
        }
    }
}

/// 提取后的数值调整
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    None,
    /// 基础类型不是晴空时加1，使0专用于晴空
    ShiftUnlessClearAir,
}

/// 单个特征的解码定义
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSpec {
    pub name: FeatureName,
    /// 描述名，绘图层据此选择色表
    pub description: &'static str,
    pub field: BitField,
    pub validity: Validity,
    pub adjust: Adjust,
    pub vmin: i16,
    pub vmax: i16,
    /// 按 `value - vmin` 索引的标签
    pub labels: &'static [&'static str],
}

impl FeatureSpec {
    /// 解码单个标志字
    ///
    /// 字段宽度能表示但超出`vmax`的备用码（PSC子类型5-7、平均码6-7）
    /// 归入`vmin`对应的"N/A"桶。
    #[inline]
    pub fn decode_word(&self, word: FlagWord) -> i16 {
        let base = FeatureType::from_word(word);
        if !self.validity.admits(base) {
            return NOT_APPLICABLE;
        }

        let mut value = self.field.extract(word) as i16;
        if self.adjust == Adjust::ShiftUnlessClearAir && base != FeatureType::ClearAir {
            value += 1;
        }

        if value > self.vmax {
            self.vmin
        } else {
            value
        }
    }

    /// 按值查找标签
    pub fn label(&self, value: i16) -> Option<&'static str> {
        if value < self.vmin || value > self.vmax {
            return None;
        }
        self.labels.get((value - self.vmin) as usize).copied()
    }
}

const CLOUD_ONLY: &[FeatureType] = &[FeatureType::Cloud];
const AEROSOL_ONLY: &[FeatureType] = &[FeatureType::Aerosol];
const STRATOSPHERIC_ONLY: &[FeatureType] = &[FeatureType::Stratospheric];
const SUBTYPE_FAMILIES: &[FeatureType] = &[
    FeatureType::Cloud,
    FeatureType::Aerosol,
    FeatureType::Stratospheric,
];

/// 特征定义表，顺序与`FeatureName`一致
static FEATURES: [FeatureSpec; 10] = [
    FeatureSpec {
        name: FeatureName::Type,
        description: "Feature Type",
        field: FEATURE_TYPE,
        validity: Validity::Always,
        adjust: Adjust::None,
        vmin: 0,
        vmax: 7,
        labels: &[
            "N/A",
            "clear air",
            "cloud",
            "trop. aerosol",
            "strat. aerosol",
            "surface",
            "subsurface",
            "no signal",
        ],
    },
    FeatureSpec {
        name: FeatureName::TypeQa,
        description: "Feature Type QA",
        field: FEATURE_TYPE_QA,
        validity: Validity::Always,
        adjust: Adjust::ShiftUnlessClearAir,
        vmin: 0,
        vmax: 4,
        labels: &["Clear Air", "No", "Low", "Medium", "High"],
    },
    FeatureSpec {
        name: FeatureName::Phase,
        description: "Ice/Water Phase",
        field: PHASE,
        validity: Validity::Only(CLOUD_ONLY),
        adjust: Adjust::None,
        vmin: NOT_APPLICABLE,
        vmax: 3,
        labels: &["N/A", "unknown", "ice", "water", "oriented ice"],
    },
    FeatureSpec {
        name: FeatureName::PhaseQa,
        description: "Ice/Water Phase QA",
        field: PHASE_QA,
        validity: Validity::Always,
        adjust: Adjust::None,
        vmin: 0,
        vmax: 3,
        labels: &["None", "Low", "Medium", "High"],
    },
    FeatureSpec {
        name: FeatureName::AerosolSubtype,
        description: "Aerosol Sub-Type",
        field: SUBTYPE,
        validity: Validity::Only(AEROSOL_ONLY),
        adjust: Adjust::None,
        vmin: NOT_APPLICABLE,
        vmax: 7,
        labels: &[
            "N/A",
            "unknown",
            "clean marine",
            "dust",
            "poll. cont.",
            "clean cont.",
            "poll. dust",
            "smoke",
            "dusty marine",
        ],
    },
    FeatureSpec {
        name: FeatureName::CloudSubtype,
        description: "Cloud Sub-Type",
        field: SUBTYPE,
        validity: Validity::Only(CLOUD_ONLY),
        adjust: Adjust::None,
        vmin: NOT_APPLICABLE,
        vmax: 7,
        labels: &[
            "N/A",
            "Low, over, thin",
            "Low, over, thick",
            "Trans. Sc",
            "Low Broken",
            "Ac",
            "As",
            "Ci",
            "Cb",
        ],
    },
    FeatureSpec {
        name: FeatureName::PscSubtype,
        description: "PSC Sub-Type",
        field: SUBTYPE,
        validity: Validity::Only(STRATOSPHERIC_ONLY),
        adjust: Adjust::None,
        vmin: NOT_APPLICABLE,
        vmax: 4,
        labels: &[
            "N/A",
            "invalid",
            "PSC aerosol",
            "volcanic ash",
            "sulfate/other",
            "elevated smoke",
        ],
    },
    FeatureSpec {
        name: FeatureName::Subtype,
        description: "Sub-Type",
        field: SUBTYPE,
        validity: Validity::Only(SUBTYPE_FAMILIES),
        adjust: Adjust::None,
        vmin: NOT_APPLICABLE,
        vmax: 7,
        labels: &[
            "N/A", "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven",
        ],
    },
    FeatureSpec {
        name: FeatureName::SubtypeQa,
        description: "Sub-Type QA",
        field: SUBTYPE_QA,
        validity: Validity::Only(SUBTYPE_FAMILIES),
        adjust: Adjust::None,
        vmin: NOT_APPLICABLE,
        vmax: 1,
        labels: &["N/A", "Not Confident", "Confident"],
    },
    FeatureSpec {
        name: FeatureName::Averaging,
        description: "Averaging Required for Detection",
        field: AVERAGING,
        validity: Validity::Always,
        adjust: Adjust::None,
        vmin: 0,
        vmax: 5,
        labels: &["N/A", "1/3 km", "1 km", "5 km", "20 km", "80 km"],
    },
];
