//! 原始VFM数据读取
//!
//! 读取Feature_Classification_Flags变量的原始转储：小端序u16，行主序。

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use bytes::Buf;
use ndarray::Array2;
use vfm_core::{FlagWord, ROW_LEN};
use vfm_kernel::rows_from_flat;

/// 将字节缓冲区解析为小端序标志字
pub fn words_from_bytes(raw: &[u8]) -> Result<Vec<FlagWord>> {
    if raw.len() % 2 != 0 {
        bail!("Raw VFM dump has an odd number of bytes: {}", raw.len());
    }

    let mut buf = raw;
    let mut words = Vec::with_capacity(raw.len() / 2);
    while buf.has_remaining() {
        words.push(buf.get_u16_le());
    }
    Ok(words)
}

/// 读取原始转储为二维数组
///
/// # 参数
/// - `path`: 转储文件路径
/// - `transposed`: 文件按 (5515, ntimes) 存放
pub fn read_rows(path: &Path, transposed: bool) -> Result<Array2<FlagWord>> {
    let raw = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let words = words_from_bytes(&raw)?;
    let rows = rows_from_flat(words)?;
    if !transposed {
        return Ok(rows);
    }

    let ntimes = rows.nrows();
    let columns = rows
        .into_shape_with_order((ROW_LEN, ntimes))
        .context("Failed to reinterpret dump as 5515 x N")?;
    Ok(columns)
}
