//! 辅助坐标轴
//!
//! 为展开块提供高度轴和水平位置轴，供外部绘图层使用。

use ndarray::{Array1, ArrayView1};
use vfm_core::{band_of_level, VfmError, BLOCK_COLUMNS, BLOCK_LEVELS};

/// 高度轴有效范围（km），开区间
pub const ALTITUDE_RANGE_KM: (f64, f64) = (-0.5, 30.0);

/// 展开块每个高度层的标称高度（km），从高到低
pub fn nominal_altitudes() -> Array1<f64> {
    Array1::from_shape_fn(BLOCK_LEVELS, |level| {
        band_of_level(level)
            .map(|band| {
                let steps = (level - band.block_offset + 1) as f64;
                band.top_km - steps * band.vertical_km
            })
            .unwrap_or(f64::NAN)
    })
}

/// 保留位于 (-0.5, 30) km 内的高度值
pub fn filter_altitudes(altitudes: &[f64]) -> Vec<f64> {
    let (low, high) = ALTITUDE_RANGE_KM;
    altitudes
        .iter()
        .copied()
        .filter(|&alt| alt > low && alt < high)
        .collect()
}

/// 将每个VFM行一个的位置值（纬度或经度）线性插值到最细水平分辨率
///
/// 采样点为 `k - 0.5`，节点为 `15 * (t - 0.5)`，两端超出部分取端点值。
///
/// # 参数
/// - `coarse`: 每个VFM行的位置值
/// - `n_profiles`: 输出采样点数，通常为 `15 * coarse.len()`
pub fn interpolate_positions(
    coarse: ArrayView1<f64>,
    n_profiles: usize,
) -> Result<Array1<f64>, VfmError> {
    let n = coarse.len();
    if n == 0 {
        return Err(VfmError::Shape(
            "Cannot interpolate positions from an empty axis".to_string(),
        ));
    }

    let step = BLOCK_COLUMNS as f64;
    let first_knot = -0.5 * step;
    let last = (n - 1) as f64;

    Ok(Array1::from_shape_fn(n_profiles, |k| {
        let x = k as f64 - 0.5;
        let u = (x - first_knot) / step;
        if u <= 0.0 {
            coarse[0]
        } else if u >= last {
            coarse[n - 1]
        } else {
            let i = u.floor() as usize;
            let frac = u - i as f64;
            coarse[i] * (1.0 - frac) + coarse[i + 1] * frac
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_nominal_altitudes() {
        let alt = nominal_altitudes();
        assert_eq!(alt.len(), BLOCK_LEVELS);
        assert!(close(alt[0], 29.92));
        assert!(close(alt[54], 20.2));
        assert!(close(alt[55], 20.14));
        assert!(close(alt[254], 8.2));
        assert!(close(alt[255], 8.17));
        assert!(close(alt[544], -0.5));

        // 严格递减
        for i in 1..BLOCK_LEVELS {
            assert!(alt[i] < alt[i - 1]);
        }
    }

    #[test]
    fn test_filter_altitudes() {
        let alt = [40.0, 30.0, 29.9, 8.2, 0.0, -0.5, -1.0];
        assert_eq!(filter_altitudes(&alt), vec![29.9, 8.2, 0.0]);
        assert!(filter_altitudes(&[]).is_empty());
    }

    #[test]
    fn test_interpolate_positions() {
        let coarse = arr1(&[0.0, 15.0, 30.0]);
        let fine = interpolate_positions(coarse.view(), 45).unwrap();
        assert_eq!(fine.len(), 45);

        // 第一个节点位于 -7.5，k=0 的采样点 -0.5 已在其后
        assert!(close(fine[0], 7.0));
        assert!(close(fine[7], 14.0));
        // 超出最后一个节点 (22.5) 后取端点值
        assert!(close(fine[23], 30.0));
        assert!(close(fine[44], 30.0));

        for k in 1..45 {
            assert!(fine[k] >= fine[k - 1]);
        }
    }

    #[test]
    fn test_interpolate_single_value() {
        let coarse = arr1(&[42.0]);
        let fine = interpolate_positions(coarse.view(), 15).unwrap();
        assert!(fine.iter().all(|&v| close(v, 42.0)));
    }

    #[test]
    fn test_interpolate_empty_axis() {
        let coarse = Array1::<f64>::zeros(0);
        assert!(matches!(
            interpolate_positions(coarse.view(), 15),
            Err(VfmError::Shape(_))
        ));
    }
}
