//! FeatureDecoder核心实现

use log::debug;
use ndarray::{Array, ArrayView, Dimension, Ix2, Zip};
use serde::Serialize;
use vfm_core::{FlagWord, VfmError};

use super::feature::FeatureName;
use crate::parallel::Parallelism;

/// 一个特征的解码结果
///
/// `data`中的每个值都位于`[vmin, vmax]`内，`labels[value - vmin]`为其标签。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFeature<D: Dimension = Ix2> {
    pub feature: FeatureName,
    pub description: &'static str,
    pub data: Array<i16, D>,
    pub vmin: i16,
    pub vmax: i16,
    pub labels: &'static [&'static str],
}

/// 单个标签的计数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub value: i16,
    pub label: &'static str,
    pub count: usize,
}

impl<D: Dimension> DecodedFeature<D> {
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn label(&self, value: i16) -> Option<&'static str> {
        self.feature.spec().label(value)
    }

    /// 各标签的出现次数，按值从`vmin`到`vmax`排列
    pub fn counts(&self) -> Vec<LabelCount> {
        let mut counts = vec![0usize; self.labels.len()];
        for &value in self.data.iter() {
            let index = (value - self.vmin) as usize;
            if let Some(count) = counts.get_mut(index) {
                *count += 1;
            }
        }

        self.labels
            .iter()
            .zip(counts)
            .enumerate()
            .map(|(i, (&label, count))| LabelCount {
                value: self.vmin + i as i16,
                label,
                count,
            })
            .collect()
    }
}

/// 解码标志字数组中的一个特征，默认并行
///
/// 输入可以是原始VFM行，也可以是展开后的块，二者字级语义相同。
/// 不修改输入，返回新分配的结果。
pub fn decode<D: Dimension>(
    words: ArrayView<'_, FlagWord, D>,
    feature: FeatureName,
) -> DecodedFeature<D> {
    decode_with(words, feature, Parallelism::default())
}

/// 解码一个特征，指定并行方式
pub fn decode_with<D: Dimension>(
    words: ArrayView<'_, FlagWord, D>,
    feature: FeatureName,
    parallelism: Parallelism,
) -> DecodedFeature<D> {
    let spec = feature.spec();
    let data = if parallelism.is_parallel() {
        Zip::from(words.view()).par_map_collect(|&word| spec.decode_word(word))
    } else {
        words.mapv(|word| spec.decode_word(word))
    };
    debug!("decoded {} words as '{}'", data.len(), feature);

    DecodedFeature {
        feature,
        description: spec.description,
        data,
        vmin: spec.vmin,
        vmax: spec.vmax,
        labels: spec.labels,
    }
}

/// 按名称解码，名称不受支持时返回`UnsupportedFeature`
pub fn decode_by_name<D: Dimension>(
    words: ArrayView<'_, FlagWord, D>,
    name: &str,
) -> Result<DecodedFeature<D>, VfmError> {
    let feature: FeatureName = name.parse()?;
    Ok(decode(words, feature))
}

/// 按固定顺序解码全部十个特征
pub fn decode_all<D: Dimension>(words: ArrayView<'_, FlagWord, D>) -> Vec<DecodedFeature<D>> {
    FeatureName::ALL
        .iter()
        .map(|&feature| decode(words.view(), feature))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, arr1, arr2, Array2};
    use vfm_core::{FEATURE_TYPE, PHASE, SUBTYPE};

    #[test]
    fn test_decode_phase_of_cloud_word() {
        // 云(2)，冰相态(1)
        let word = PHASE.insert(FEATURE_TYPE.insert(0, 2), 1);
        assert_eq!(word, 0b0000_0000_0010_0010);

        let words = arr1(&[word]);
        let phase = decode(words.view(), FeatureName::Phase);
        assert_eq!(phase.data[0], 1);
        assert_eq!(phase.label(1), Some("ice"));

        let aerosol = decode(words.view(), FeatureName::AerosolSubtype);
        assert_eq!(aerosol.data[0], -1);
    }

    #[test]
    fn test_decode_metadata() {
        let words = Array2::<FlagWord>::zeros((2, 3));
        let decoded = decode(words.view(), FeatureName::PscSubtype);
        assert_eq!(decoded.shape(), &[2, 3]);
        assert_eq!(decoded.description, "PSC Sub-Type");
        assert_eq!(decoded.vmin, -1);
        assert_eq!(decoded.vmax, 4);
        assert_eq!(decoded.labels.len(), 6);
    }

    #[test]
    fn test_decode_does_not_mutate_input() {
        let words = arr2(&[[0xFFFFu16, 0x1234], [0x0A45, 0xD234]]);
        let before = words.clone();
        for feature in FeatureName::ALL {
            let _ = decode(words.view(), feature);
        }
        assert_eq!(words, before);
    }

    #[test]
    fn test_decode_zero_dimensional() {
        let word = SUBTYPE.insert(FEATURE_TYPE.insert(0, 3), 2);
        let words = arr0(word);
        let decoded = decode(words.view(), FeatureName::AerosolSubtype);
        assert_eq!(decoded.data[()], 2);
        assert_eq!(decoded.label(2), Some("dust"));
    }

    #[test]
    fn test_decode_by_name() {
        let words = arr1(&[0u16]);
        assert_eq!(
            decode_by_name(words.view(), "typeqa").unwrap().feature,
            FeatureName::TypeQa
        );
        assert!(matches!(
            decode_by_name(words.view(), "bogus"),
            Err(VfmError::UnsupportedFeature(name)) if name == "bogus"
        ));
    }

    #[test]
    fn test_decode_all_order() {
        let words = arr1(&[0u16, 1, 2]);
        let all = decode_all(words.view());
        let names: Vec<FeatureName> = all.iter().map(|d| d.feature).collect();
        assert_eq!(names, FeatureName::ALL.to_vec());
    }

    #[test]
    fn test_counts() {
        // 无效、晴空、云、云
        let words = arr1(&[0u16, 1, 2, 2]);
        let decoded = decode(words.view(), FeatureName::Type);
        let counts = decoded.counts();
        assert_eq!(counts.len(), 8);
        assert_eq!(counts[0].label, "N/A");
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[1].count, 1);
        assert_eq!(counts[2].value, 2);
        assert_eq!(counts[2].count, 2);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 4);

        let phase = decode(words.view(), FeatureName::Phase);
        let counts = phase.counts();
        assert_eq!(counts[0].value, -1);
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let words = Array2::from_shape_fn((16, 4096), |(i, j)| (i * 4096 + j) as FlagWord);
        for feature in FeatureName::ALL {
            let parallel = decode_with(words.view(), feature, Parallelism::Parallel);
            let sequential = decode_with(words.view(), feature, Parallelism::Sequential);
            assert_eq!(parallel, sequential, "{feature}");
        }
    }
}
