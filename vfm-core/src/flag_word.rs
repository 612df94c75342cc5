//! 标志字位布局
//!
//! VFM标志字为16位无符号整数，bit 0为最低位：
//!
//! | Bits  | 字段 |
//! |-------|------|
//! | 0-2   | 特征类型 |
//! | 3-4   | 特征类型QA |
//! | 5-6   | 冰/水相态 |
//! | 7-8   | 相态QA |
//! | 9-11  | 特征子类型（含义取决于特征类型） |
//! | 12    | 子类型QA |
//! | 13-15 | 检测所需水平平均尺度 |

use serde::{Deserialize, Serialize};

/// 单个采样点的打包分类值
pub type FlagWord = u16;

/// 标志字中的一个bit字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitField {
    /// 最低位的bit偏移（从0开始）
    pub offset: u32,
    /// bit宽度
    pub width: u32,
}

impl BitField {
    pub const fn new(offset: u32, width: u32) -> Self {
        Self { offset, width }
    }

    /// 右移后的字段掩码
    pub const fn mask(self) -> u16 {
        ((1u32 << self.width) - 1) as u16
    }

    /// 字段可表示的最大值
    pub const fn max_value(self) -> u16 {
        self.mask()
    }

    /// 从标志字中提取字段值
    ///
    /// # 示例
    /// ```
    /// use vfm_core::PHASE;
    ///
    /// let word = 0b0000_0000_0010_1010;
    /// assert_eq!(PHASE.extract(word), 1);
    /// ```
    #[inline]
    pub const fn extract(self, word: FlagWord) -> u16 {
        (word >> self.offset) & self.mask()
    }

    /// 将值写入标志字的字段位置，超出宽度的高位被截断
    #[inline]
    pub const fn insert(self, word: FlagWord, value: u16) -> FlagWord {
        let mask = self.mask() << self.offset;
        (word & !mask) | ((value << self.offset) & mask)
    }
}

/// bits 0-2 特征类型
pub const FEATURE_TYPE: BitField = BitField::new(0, 3);
/// bits 3-4 特征类型QA（原始2bit值）
pub const FEATURE_TYPE_QA: BitField = BitField::new(3, 2);
/// bits 5-6 冰/水相态
pub const PHASE: BitField = BitField::new(5, 2);
/// bits 7-8 冰/水相态QA
pub const PHASE_QA: BitField = BitField::new(7, 2);
/// bits 9-11 特征子类型
pub const SUBTYPE: BitField = BitField::new(9, 3);
/// bit 12 子类型QA
pub const SUBTYPE_QA: BitField = BitField::new(12, 1);
/// bits 13-15 检测所需水平平均
pub const AVERAGING: BitField = BitField::new(13, 3);

/// 特征类型（bits 0-2）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FeatureType {
    /// 无效（数据缺失或损坏）
    Invalid = 0,
    ClearAir = 1,
    Cloud = 2,
    /// 对流层气溶胶
    Aerosol = 3,
    /// 平流层特征（PSC/平流层气溶胶）
    Stratospheric = 4,
    Surface = 5,
    Subsurface = 6,
    /// 完全衰减，无信号
    NoSignal = 7,
}

impl FeatureType {
    /// 从3bit原始码转换，只使用低3位
    pub const fn from_code(code: u16) -> Self {
        match code & 0b111 {
            0 => FeatureType::Invalid,
            1 => FeatureType::ClearAir,
            2 => FeatureType::Cloud,
            3 => FeatureType::Aerosol,
            4 => FeatureType::Stratospheric,
            5 => FeatureType::Surface,
            6 => FeatureType::Subsurface,
            _ => FeatureType::NoSignal,
        }
    }

    /// 读取标志字的基础特征类型
    #[inline]
    pub const fn from_word(word: FlagWord) -> Self {
        Self::from_code(FEATURE_TYPE.extract(word))
    }

    pub const fn code(self) -> u16 {
        self as u16
    }

    /// 是否拥有子类型字段（气溶胶、云、平流层特征）
    pub const fn has_subtype(self) -> bool {
        matches!(
            self,
            FeatureType::Cloud | FeatureType::Aerosol | FeatureType::Stratospheric
        )
    }
}
