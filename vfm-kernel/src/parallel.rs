//! 并行执行开关
//!
//! 展开和解码的逐行、逐字计算互相独立，可选择rayon并行或顺序执行，
//! 两种模式的输出完全一致。

use rayon::prelude::*;

/// 是否允许并行执行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    Sequential,
    #[default]
    Parallel,
}

impl Parallelism {
    /// 按线程数语义创建
    ///
    /// - 0 = 自动（rayon线程池多于1个线程时并行）
    /// - 1 = 顺序
    /// - >1 = 并行
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// 对不实现`IntoParallelIterator`的迭代器（如`axis_chunks_iter_mut`）逐项执行
    #[inline]
    pub fn maybe_par_bridge_for_each<T, I, F>(self, iter: I, f: F)
    where
        T: Send,
        I: Iterator<Item = T> + Send,
        F: Fn(T) + Sync + Send,
    {
        if self.is_parallel() {
            iter.par_bridge().for_each(f);
        } else {
            iter.for_each(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_from_threads() {
        assert_eq!(Parallelism::from_threads(1), Parallelism::Sequential);
        assert_eq!(Parallelism::from_threads(4), Parallelism::Parallel);
        assert!(Parallelism::default().is_parallel());
    }

    #[test]
    fn test_bridge_visits_every_item() {
        for mode in [Parallelism::Sequential, Parallelism::Parallel] {
            let sum = AtomicUsize::new(0);
            mode.maybe_par_bridge_for_each(0..100usize, |i| {
                sum.fetch_add(i, Ordering::Relaxed);
            });
            assert_eq!(sum.load(Ordering::Relaxed), 4950);
        }
    }
}
