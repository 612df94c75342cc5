//! 分辨率展开器
//!
//! 将一批混合水平分辨率的VFM行（ntimes × 5515）展开为统一分辨率的块
//! （545 × 15·ntimes）。低分辨率波段的每个原始子列在水平方向上重复：
//! 波段A每组重复5列，波段B每组重复3列，波段C保持原样。
//!
//! 输出高度轴依次为波段A的55层、波段B的200层、波段C的290层；输出列按
//! （原始时间索引，子列0..14）行主序排列。该操作只做结构重排，不改变任何值，
//! 因此可以作用于打包的标志字，也可以作用于已解码的数据。

use log::{debug, warn};
use ndarray::{s, Array2, ArrayView1, ArrayView2, ArrayViewD, ArrayViewMut2, Axis, Ix2};
use vfm_core::{FlagWord, VfmError, BANDS, BLOCK_COLUMNS, BLOCK_LEVELS, ROW_LEN};

use crate::parallel::Parallelism;

/// 输入行数组的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrientation {
    /// (ntimes, 5515)
    TimeMajor,
    /// (5515, ntimes)，需要转置
    Transposed,
}

/// 判断输入数组的方向
///
/// 只检查哪个轴长度为5515：第二个轴优先，其次第一个轴。两个轴都为5515时
/// 按`TimeMajor`处理，这是已知的歧义，此处不做进一步推断。
pub fn detect_orientation(shape: (usize, usize)) -> Result<RowOrientation, VfmError> {
    let (ntimes, rowlen) = shape;
    if rowlen == ROW_LEN {
        Ok(RowOrientation::TimeMajor)
    } else if ntimes == ROW_LEN {
        Ok(RowOrientation::Transposed)
    } else {
        Err(VfmError::Shape(format!(
            "Could not find a dimension with length {ROW_LEN}: shape=({ntimes}, {rowlen})"
        )))
    }
}

/// 展开VFM行，默认并行
///
/// # 参数
/// - `rows`: (ntimes, 5515) 或 (5515, ntimes) 的标志字数组
///
/// # 返回
/// - `Ok(Array2)`: (545, 15·ntimes) 的统一分辨率块
/// - `Err(VfmError::Shape)`: 没有长度为5515的轴
pub fn expand(rows: ArrayView2<FlagWord>) -> Result<Array2<FlagWord>, VfmError> {
    expand_with(rows, Parallelism::default())
}

/// 展开VFM行，指定并行方式
pub fn expand_with(
    rows: ArrayView2<FlagWord>,
    parallelism: Parallelism,
) -> Result<Array2<FlagWord>, VfmError> {
    let rows = match detect_orientation(rows.dim())? {
        RowOrientation::TimeMajor => rows,
        RowOrientation::Transposed => {
            warn!(
                "VFM rows have shape {:?}, transposing to find the {ROW_LEN}-word axis",
                rows.dim()
            );
            rows.reversed_axes()
        }
    };
    let ntimes = rows.nrows();

    // 按 (时间×子列, 高度) 填充，每个输入行写入自己的15×545切片
    let mut profiles = Array2::<FlagWord>::zeros((ntimes * BLOCK_COLUMNS, BLOCK_LEVELS));
    parallelism.maybe_par_bridge_for_each(
        profiles
            .axis_chunks_iter_mut(Axis(0), BLOCK_COLUMNS)
            .zip(rows.outer_iter()),
        |(out, row)| expand_row(row, out),
    );

    let block = profiles.reversed_axes().as_standard_layout().into_owned();
    debug!(
        "expanded {} VFM rows into a {:?} block ({:?})",
        ntimes,
        block.dim(),
        parallelism
    );
    Ok(block)
}

/// 展开任意维度的输入，非二维时返回`Shape`错误
pub fn expand_dyn(rows: ArrayViewD<FlagWord>) -> Result<Array2<FlagWord>, VfmError> {
    let ndim = rows.ndim();
    let rows = rows.into_dimensionality::<Ix2>().map_err(|_| {
        VfmError::Shape(format!("Input data should have 2 dimensions, got {ndim}"))
    })?;
    expand(rows)
}

/// 将连续存放的标志字缓冲区整理为 (n, 5515) 的行数组
pub fn rows_from_flat(words: Vec<FlagWord>) -> Result<Array2<FlagWord>, VfmError> {
    let len = words.len();
    if len == 0 || len % ROW_LEN != 0 {
        return Err(VfmError::Shape(format!(
            "Buffer of {len} words is not a whole number of {ROW_LEN}-word rows"
        )));
    }
    Array2::from_shape_vec((len / ROW_LEN, ROW_LEN), words)
        .map_err(|e| VfmError::Shape(e.to_string()))
}

/// 展开单个VFM行到 (15, 545) 的输出切片
fn expand_row(row: ArrayView1<FlagWord>, mut out: ArrayViewMut2<FlagWord>) {
    for band in &BANDS {
        let levels = band.block_range();
        for column in 0..BLOCK_COLUMNS {
            let source = band.group_range(band.source_group(column));
            out.slice_mut(s![column, levels.clone()])
                .assign(&row.slice(s![source]));
        }
    }
}
