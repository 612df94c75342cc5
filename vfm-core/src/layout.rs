//! VFM行布局
//!
//! 一个VFM行包含5515个标志字，按高度分为三个水平分辨率不同的连续波段：
//!
//! - 波段A：55个高度层 × 3个水平子列（20.2-30.1 km）
//! - 波段B：200个高度层 × 5个水平子列（8.2-20.2 km）
//! - 波段C：290个高度层 × 15个水平子列（-0.5-8.2 km，全分辨率）
//!
//! 在行内，每个波段按子列分组存放，每组包含该子列的全部高度层。

use serde::Serialize;

/// 一个高度波段的布局
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub name: &'static str,
    /// 高度层数
    pub levels: usize,
    /// 原始水平子列数
    pub groups: usize,
    /// 在VFM行中的起始字偏移
    pub row_offset: usize,
    /// 在展开块中的起始高度层
    pub block_offset: usize,
    /// 波段顶部标称高度（km）
    pub top_km: f64,
    /// 垂直分辨率（km）
    pub vertical_km: f64,
}

impl Band {
    /// 该波段在VFM行中占用的字数
    pub const fn row_len(&self) -> usize {
        self.levels * self.groups
    }

    /// 每个原始子列在展开块中重复的列数
    pub const fn replication(&self) -> usize {
        BLOCK_COLUMNS / self.groups
    }

    /// 展开块第`column`列使用的原始子列
    pub const fn source_group(&self, column: usize) -> usize {
        column / self.replication()
    }

    /// 原始子列`group`在VFM行中的字范围
    pub const fn group_range(&self, group: usize) -> std::ops::Range<usize> {
        let start = self.row_offset + group * self.levels;
        start..start + self.levels
    }

    /// 该波段在展开块中的高度层范围
    pub const fn block_range(&self) -> std::ops::Range<usize> {
        self.block_offset..self.block_offset + self.levels
    }
}

pub const BAND_A: Band = Band {
    name: "A",
    levels: 55,
    groups: 3,
    row_offset: 0,
    block_offset: 0,
    top_km: 30.1,
    vertical_km: 0.180,
};

pub const BAND_B: Band = Band {
    name: "B",
    levels: 200,
    groups: 5,
    row_offset: 165,
    block_offset: 55,
    top_km: 20.2,
    vertical_km: 0.060,
};

pub const BAND_C: Band = Band {
    name: "C",
    levels: 290,
    groups: 15,
    row_offset: 1165,
    block_offset: 255,
    top_km: 8.2,
    vertical_km: 0.030,
};

/// 按展开块高度顺序排列的三个波段
pub static BANDS: [Band; 3] = [BAND_A, BAND_B, BAND_C];

/// VFM行长度（字）
pub const ROW_LEN: usize = 5515;
/// 展开块高度层数
pub const BLOCK_LEVELS: usize = 545;
/// 展开块每行对应的水平列数（最细分辨率）
pub const BLOCK_COLUMNS: usize = 15;

/// 展开块第`level`层所属的波段
pub fn band_of_level(level: usize) -> Option<&'static Band> {
    BANDS.iter().find(|band| band.block_range().contains(&level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_are_contiguous() {
        let mut row_offset = 0;
        let mut block_offset = 0;
        for band in &BANDS {
            assert_eq!(band.row_offset, row_offset);
            assert_eq!(band.block_offset, block_offset);
            assert_eq!(BLOCK_COLUMNS % band.groups, 0);
            row_offset += band.row_len();
            block_offset += band.levels;
        }
        assert_eq!(row_offset, ROW_LEN);
        assert_eq!(block_offset, BLOCK_LEVELS);
    }

    #[test]
    fn test_row_lengths() {
        assert_eq!(BAND_A.row_len(), 165);
        assert_eq!(BAND_B.row_len(), 1000);
        assert_eq!(BAND_C.row_len(), 4350);
    }

    #[test]
    fn test_source_group() {
        // 波段A每组重复5列，波段B每组重复3列，波段C一一对应
        let a: Vec<usize> = (0..BLOCK_COLUMNS).map(|j| BAND_A.source_group(j)).collect();
        assert_eq!(a, vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);

        let b: Vec<usize> = (0..BLOCK_COLUMNS).map(|j| BAND_B.source_group(j)).collect();
        assert_eq!(b, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);

        for j in 0..BLOCK_COLUMNS {
            assert_eq!(BAND_C.source_group(j), j);
        }
    }

    #[test]
    fn test_group_range() {
        assert_eq!(BAND_A.group_range(2), 110..165);
        assert_eq!(BAND_B.group_range(0), 165..365);
        assert_eq!(BAND_C.group_range(14), 5225..5515);
    }

    #[test]
    fn test_band_of_level() {
        assert_eq!(band_of_level(0).map(|b| b.name), Some("A"));
        assert_eq!(band_of_level(54).map(|b| b.name), Some("A"));
        assert_eq!(band_of_level(55).map(|b| b.name), Some("B"));
        assert_eq!(band_of_level(254).map(|b| b.name), Some("B"));
        assert_eq!(band_of_level(255).map(|b| b.name), Some("C"));
        assert_eq!(band_of_level(544).map(|b| b.name), Some("C"));
        assert!(band_of_level(545).is_none());
    }
}
